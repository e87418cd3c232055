//=========================================================================
// Scene Node
//=========================================================================
//
// Tree node stored in the scene graph arena.
//
// Per-node behavior is a closed set of variants:
//   NodeKind
//     ├─ Container   (layers, root; draws nothing)
//     ├─ Sprite      (static decoration, e.g. background)
//     ├─ Entity      (moving node without a payload)
//     └─ Aircraft    (entity + sprite + classification)
//
// Each variant implements `NodeBehavior`; `NodeKind` forwards to it.
// Typed commands narrow a node to one variant through `NodeVariant`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::entity::{Aircraft, Entity, SpriteNode};
use super::transform::Transform;
use super::NodeKey;
use crate::core::category::Category;
use crate::core::render::{RenderStates, RenderTarget};

//=== NodeBehavior ========================================================

/// Per-variant hooks invoked by the scene graph.
///
/// All hooks have defaults, so a variant only overrides what it needs.
pub trait NodeBehavior {
    /// Classification used for command routing.
    fn category(&self) -> Category {
        Category::SCENE
    }

    /// Runs once per update pass, before the node's children update.
    fn update_current(&mut self, _transform: &mut Transform, _dt: Duration) {}

    /// Draws the node's own payload with its composed world states.
    fn draw_current(&self, _target: &mut dyn RenderTarget, _states: &RenderStates) {}
}

//=== NodeVariant =========================================================

/// A node variant that typed commands can act upon.
///
/// `narrow` is the only path from a generic node to a concrete variant;
/// there is no unchecked cast anywhere in dispatch.
pub trait NodeVariant: 'static {
    /// Variant name used in diagnostics.
    const NAME: &'static str;

    /// Returns the variant data if `kind` is (or embeds) this variant.
    fn narrow(kind: &mut NodeKind) -> Option<&mut Self>;
}

//=== NodeKind ============================================================

/// Behavior payload of a scene node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Container,
    Sprite(SpriteNode),
    Entity(Entity),
    Aircraft(Aircraft),
}

impl NodeKind {
    /// Variant name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Sprite(_) => SpriteNode::NAME,
            Self::Entity(_) => Entity::NAME,
            Self::Aircraft(_) => Aircraft::NAME,
        }
    }
}

impl NodeBehavior for NodeKind {
    fn category(&self) -> Category {
        match self {
            Self::Container => Category::SCENE,
            Self::Sprite(sprite) => sprite.category(),
            Self::Entity(entity) => entity.category(),
            Self::Aircraft(aircraft) => aircraft.category(),
        }
    }

    fn update_current(&mut self, transform: &mut Transform, dt: Duration) {
        match self {
            Self::Container => {}
            Self::Sprite(sprite) => sprite.update_current(transform, dt),
            Self::Entity(entity) => entity.update_current(transform, dt),
            Self::Aircraft(aircraft) => aircraft.update_current(transform, dt),
        }
    }

    fn draw_current(&self, target: &mut dyn RenderTarget, states: &RenderStates) {
        match self {
            Self::Container => {}
            Self::Sprite(sprite) => sprite.draw_current(target, states),
            Self::Entity(entity) => entity.draw_current(target, states),
            Self::Aircraft(aircraft) => aircraft.draw_current(target, states),
        }
    }
}

//=== SceneNode ===========================================================

/// A node of the scene graph.
///
/// Hierarchy links are managed by [`SceneGraph`](super::SceneGraph); a
/// freshly built node is always a detached leaf.
#[derive(Debug, Clone)]
pub struct SceneNode {
    transform: Transform,
    kind: NodeKind,
    category_override: Option<Category>,
    pub(super) parent: Option<NodeKey>,
    pub(super) children: Vec<NodeKey>,
}

impl SceneNode {
    //--- Construction -----------------------------------------------------

    pub fn new(kind: NodeKind) -> Self {
        Self {
            transform: Transform::IDENTITY,
            kind,
            category_override: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Empty grouping node.
    pub fn container() -> Self {
        Self::new(NodeKind::Container)
    }

    /// Places the node at `position` in its parent's space.
    pub fn at(mut self, position: glam::Vec2) -> Self {
        self.transform.set_position(position);
        self
    }

    /// Replaces the variant's classification for this node.
    ///
    /// Lets a grouping node (a formation, a layer) be targeted by commands
    /// without inventing a new variant.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category_override = Some(category);
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    /// Non-owning link to the parent, `None` for roots and detached nodes.
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn category(&self) -> Category {
        self.category_override
            .unwrap_or_else(|| self.kind.category())
    }

    /// Narrows the node to variant `T`.
    pub fn variant_mut<T: NodeVariant>(&mut self) -> Option<&mut T> {
        T::narrow(&mut self.kind)
    }

    //--- Per-frame hooks --------------------------------------------------

    pub(super) fn update_current(&mut self, dt: Duration) {
        self.kind.update_current(&mut self.transform, dt);
    }

    pub(super) fn draw_current(&self, target: &mut dyn RenderTarget, states: &RenderStates) {
        self.kind.draw_current(target, states);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
