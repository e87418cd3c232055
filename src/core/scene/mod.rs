//=========================================================================
// Scene System
//=========================================================================
//
// Hierarchical scene graph with per-node local transforms.
//
// Architecture:
//   SceneGraph
//     └─ SlotMap<NodeKey, SceneNode>
//          ├─ transform : Transform        (local, relative to parent)
//          ├─ kind      : NodeKind         (Container / Sprite / Entity / Aircraft)
//          ├─ parent    : Option<NodeKey>  (non-owning)
//          └─ children  : Vec<NodeKey>     (ordered)
//
// Flow:
//   World::update() → SceneGraph::dispatch(cmd) → Command::execute()
//                   → SceneGraph::update(dt)   → NodeBehavior::update_current()
//   World::draw()   → SceneGraph::draw()       → NodeBehavior::draw_current()
//
//=========================================================================

//=== Module Declarations =================================================

mod entity;
mod graph;
mod node;
mod transform;

//=== Public API ==========================================================

pub use entity::{Aircraft, AircraftType, Entity, SpriteNode};
pub use graph::SceneGraph;
pub use node::{NodeBehavior, NodeKind, NodeVariant, SceneNode};
pub use transform::Transform;

slotmap::new_key_type! {
    /// Stable handle to a node inside a [`SceneGraph`].
    pub struct NodeKey;
}
