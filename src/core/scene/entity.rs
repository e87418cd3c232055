//=========================================================================
// Node Variants
//=========================================================================
//
// Concrete payloads carried by `NodeKind`.
//
// SpriteNode  : static textured quad
// Entity      : velocity integrated into the node's position
// Aircraft    : Entity + sprite + type-driven category
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::node::{NodeBehavior, NodeKind, NodeVariant};
use super::transform::Transform;
use crate::core::category::Category;
use crate::core::render::{Drawable, Rect, RenderStates, RenderTarget, Sprite};
use crate::core::resources::{Texture, TextureHolder, TextureId};

//=== SpriteNode ==========================================================

/// Node that draws a single sprite and never moves by itself.
#[derive(Debug, Clone)]
pub struct SpriteNode {
    sprite: Sprite,
}

impl SpriteNode {
    pub fn new(texture: &Texture) -> Self {
        Self {
            sprite: Sprite::new(texture),
        }
    }

    /// Sprite node repeating `texture` over `area`.
    pub fn tiled(texture: &Texture, area: Rect) -> Self {
        Self {
            sprite: Sprite::tiled(texture, area),
        }
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }
}

impl NodeBehavior for SpriteNode {
    fn draw_current(&self, target: &mut dyn RenderTarget, states: &RenderStates) {
        target.draw(Drawable::Sprite(&self.sprite), states);
    }
}

impl NodeVariant for SpriteNode {
    const NAME: &'static str = "sprite";

    fn narrow(kind: &mut NodeKind) -> Option<&mut Self> {
        match kind {
            NodeKind::Sprite(sprite) => Some(sprite),
            _ => None,
        }
    }
}

//=== Entity ==============================================================

/// A node that moves with a constant velocity between updates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Entity {
    velocity: Vec2,
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_velocity(velocity: Vec2) -> Self {
        Self { velocity }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Adds `delta` to the current velocity.
    pub fn accelerate(&mut self, delta: Vec2) {
        self.velocity += delta;
    }
}

impl NodeBehavior for Entity {
    fn update_current(&mut self, transform: &mut Transform, dt: Duration) {
        transform.move_by(self.velocity * dt.as_secs_f32());
    }
}

impl NodeVariant for Entity {
    const NAME: &'static str = "entity";

    /// Aircraft embed an entity, so entity commands reach them too.
    fn narrow(kind: &mut NodeKind) -> Option<&mut Self> {
        match kind {
            NodeKind::Entity(entity) => Some(entity),
            NodeKind::Aircraft(aircraft) => Some(&mut aircraft.entity),
            _ => None,
        }
    }
}

//=== Aircraft ============================================================

/// Aircraft models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AircraftType {
    Eagle,
    Raptor,
}

impl AircraftType {
    pub fn texture_id(self) -> TextureId {
        match self {
            Self::Eagle => TextureId::Eagle,
            Self::Raptor => TextureId::Raptor,
        }
    }

    /// The Eagle is the player's model; every other model is hostile.
    pub fn category(self) -> Category {
        match self {
            Self::Eagle => Category::PLAYER_AIRCRAFT,
            Self::Raptor => Category::ENEMY_AIRCRAFT,
        }
    }
}

/// A moving, drawable aircraft.
#[derive(Debug, Clone)]
pub struct Aircraft {
    entity: Entity,
    kind: AircraftType,
    sprite: Sprite,
}

impl Aircraft {
    /// Builds an aircraft whose sprite is centred on the node's position.
    ///
    /// # Panics
    ///
    /// Panics if the model's texture is missing from `textures`.
    #[track_caller]
    pub fn new(kind: AircraftType, textures: &TextureHolder) -> Self {
        let mut sprite = Sprite::new(textures.get(kind.texture_id()));
        sprite.center_origin();
        Self {
            entity: Entity::new(),
            kind,
            sprite,
        }
    }

    pub fn kind(&self) -> AircraftType {
        self.kind
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn velocity(&self) -> Vec2 {
        self.entity.velocity()
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.entity.set_velocity(velocity);
    }

    pub fn accelerate(&mut self, delta: Vec2) {
        self.entity.accelerate(delta);
    }
}

impl NodeBehavior for Aircraft {
    fn category(&self) -> Category {
        self.kind.category()
    }

    fn update_current(&mut self, transform: &mut Transform, dt: Duration) {
        self.entity.update_current(transform, dt);
    }

    fn draw_current(&self, target: &mut dyn RenderTarget, states: &RenderStates) {
        target.draw(Drawable::Sprite(&self.sprite), states);
    }
}

impl NodeVariant for Aircraft {
    const NAME: &'static str = "aircraft";

    fn narrow(kind: &mut NodeKind) -> Option<&mut Self> {
        match kind {
            NodeKind::Aircraft(aircraft) => Some(aircraft),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
