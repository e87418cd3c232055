//=========================================================================
// Resource Holders
//=========================================================================
//
// Keyed lookup of shared visual resources (textures, fonts).
//
// Architecture:
//   host loader ──insert(id, resource)──> ResourceHolder<K, R>
//                                              │
//   node / state constructors ◄──get(id)───────┘
//
// Decoding files is the host's job. The core only sees opaque handles
// carrying the metadata it needs for layout (texture size, font name).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use glam::UVec2;
use log::warn;

//=== Internal Dependencies ===============================================

use super::error::{CoreError, CoreResult};

//=== Identifiers =========================================================

/// Textures used by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    Eagle,
    Raptor,
    Desert,
    TitleScreen,
}

/// Fonts used by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontId {
    Main,
}

//=== Handles =============================================================

/// Opaque handle to a texture owned by the host renderer.
///
/// Cloning is cheap; the name is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    name: Arc<str>,
    size: UVec2,
}

impl Texture {
    pub fn new(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: Arc::from(name),
            size: UVec2::new(width, height),
        }
    }

    /// Name the host used to register the texture (usually its path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in pixels.
    pub fn size(&self) -> UVec2 {
        self.size
    }
}

/// Opaque handle to a font owned by the host renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    name: Arc<str>,
}

impl Font {
    pub fn new(name: &str) -> Self {
        Self { name: Arc::from(name) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

//=== ResourceHolder ======================================================

/// Maps identifiers to loaded resources.
pub struct ResourceHolder<K, R> {
    resources: HashMap<K, R>,
}

/// Texture holder keyed by [`TextureId`].
pub type TextureHolder = ResourceHolder<TextureId, Texture>;

/// Font holder keyed by [`FontId`].
pub type FontHolder = ResourceHolder<FontId, Font>;

impl<K, R> ResourceHolder<K, R>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Creates an empty holder.
    pub fn new() -> Self {
        Self {
            resources: HashMap::new(),
        }
    }

    /// Stores a resource under `id`, replacing any previous one.
    pub fn insert(&mut self, id: K, resource: R) {
        if self.resources.insert(id, resource).is_some() {
            warn!("Resource {:?} was already loaded and has been replaced", id);
        }
    }

    /// Returns the resource registered under `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was never inserted. Resources are loaded once at
    /// startup, so a miss means the loader and the game disagree.
    #[track_caller]
    pub fn get(&self, id: K) -> &R {
        match self.try_get(id) {
            Ok(resource) => resource,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible twin of [`get`](Self::get).
    pub fn try_get(&self, id: K) -> CoreResult<&R> {
        self.resources
            .get(&id)
            .ok_or_else(|| CoreError::MissingResource(format!("{:?}", id)))
    }

    pub fn contains(&self, id: K) -> bool {
        self.resources.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl<K, R> Default for ResourceHolder<K, R>
where
    K: Copy + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get_returns_resource() {
        let mut textures = TextureHolder::new();
        textures.insert(TextureId::Eagle, Texture::new("Eagle.png", 48, 64));

        let eagle = textures.get(TextureId::Eagle);
        assert_eq!(eagle.name(), "Eagle.png");
        assert_eq!(eagle.size(), UVec2::new(48, 64));
    }

    #[test]
    fn reinsert_replaces_previous_resource() {
        let mut fonts = FontHolder::new();
        fonts.insert(FontId::Main, Font::new("Old.ttf"));
        fonts.insert(FontId::Main, Font::new("Sansation.ttf"));

        assert_eq!(fonts.len(), 1);
        assert_eq!(fonts.get(FontId::Main).name(), "Sansation.ttf");
    }

    #[test]
    fn try_get_reports_missing_id() {
        let textures = TextureHolder::new();
        assert_eq!(
            textures.try_get(TextureId::Desert),
            Err(CoreError::MissingResource("Desert".into()))
        );
    }

    #[test]
    #[should_panic(expected = "resource Raptor was never loaded")]
    fn get_missing_panics() {
        let textures = TextureHolder::new();
        textures.get(TextureId::Raptor);
    }

    #[test]
    fn texture_clone_shares_name() {
        let a = Texture::new("Desert.png", 512, 512);
        let b = a.clone();
        assert_eq!(a, b);
    }
}
