//=========================================================================
// Scene Graph
//=========================================================================
//
// Arena-backed tree of scene nodes.
//
// Architecture:
//   SceneGraph
//     ├─ nodes: SlotMap<NodeKey, SceneNode>   (owns every node)
//     └─ root:  NodeKey                       (always a container)
//
// Ownership:
//   The arena owns every node. A node is either reachable from the root
//   or detached; a detached node stays alive until `destroy` releases its
//   subtree, so the key returned by `detach` is the transfer of ownership.
//
// Traversal (all depth-first, children in insertion order):
//   update   : parent.update_current → children
//   draw     : parent.draw_current   → children   (states accumulate)
//   dispatch : command.execute(parent) → children   (category filter)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ops::{Index, IndexMut};
use std::time::Duration;

use glam::{Affine2, Vec2};
use log::debug;
use slotmap::SlotMap;

//=== Internal Dependencies ===============================================

use super::node::SceneNode;
use super::NodeKey;
use crate::core::command::Command;
use crate::core::error::{CoreError, CoreResult};
use crate::core::render::{RenderStates, RenderTarget};

//=== SceneGraph ==========================================================

/// Owns a tree of [`SceneNode`]s addressed by [`NodeKey`].
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, SceneNode>,
    root: NodeKey,
}

impl SceneGraph {
    //=== Construction ====================================================

    /// Creates a graph holding a single container root.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::container());
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Number of live nodes, root and detached subtrees included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; the root cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    //=== Node Access =====================================================

    pub fn get(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    /// Children of `key` in draw order.
    ///
    /// # Panics
    ///
    /// Panics if `key` is stale.
    #[track_caller]
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self[key].children()
    }

    #[track_caller]
    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self[key].parent()
    }

    //=== Structure =======================================================

    /// Adds `node` to the arena as a detached node.
    pub fn create(&mut self, node: SceneNode) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Creates `node` and attaches it as the last child of `parent`.
    #[track_caller]
    pub fn insert_child(&mut self, parent: NodeKey, node: SceneNode) -> NodeKey {
        let child = self.create(node);
        self.attach(parent, child);
        child
    }

    /// Appends `child` to the children of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either key is stale, if `child` already has a parent (or
    /// is the root), or if `child` is `parent` or one of its ancestors.
    #[track_caller]
    pub fn attach(&mut self, parent: NodeKey, child: NodeKey) {
        if let Err(err) = self.try_attach(parent, child) {
            panic!("{err}");
        }
    }

    /// Fallible twin of [`attach`](Self::attach).
    pub fn try_attach(&mut self, parent: NodeKey, child: NodeKey) -> CoreResult<()> {
        self.require(parent)?;
        self.require(child)?;

        if child == self.root || self.nodes[child].parent.is_some() {
            return Err(CoreError::AlreadyAttached(format!("{:?}", child)));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(CoreError::WouldCycle {
                parent: format!("{:?}", parent),
                child: format!("{:?}", child),
            });
        }

        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// Removes `child` from the children of `parent` and returns its key.
    ///
    /// The subtree stays in the arena, detached, with its local transform
    /// unchanged. It can be attached again or released with
    /// [`destroy`](Self::destroy).
    ///
    /// # Panics
    ///
    /// Panics if `child` is not a direct child of `parent`.
    #[track_caller]
    pub fn detach(&mut self, parent: NodeKey, child: NodeKey) -> NodeKey {
        match self.try_detach(parent, child) {
            Ok(key) => key,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible twin of [`detach`](Self::detach).
    pub fn try_detach(&mut self, parent: NodeKey, child: NodeKey) -> CoreResult<NodeKey> {
        self.require(parent)?;

        let position = self.nodes[parent]
            .children
            .iter()
            .position(|&key| key == child)
            .ok_or_else(|| CoreError::NotAChild {
                parent: format!("{:?}", parent),
                child: format!("{:?}", child),
            })?;

        self.nodes[parent].children.remove(position);
        self.nodes[child].parent = None;
        Ok(child)
    }

    /// Releases `key` and its whole subtree.
    ///
    /// A node still attached is unlinked from its parent first. Destroying
    /// the root releases its descendants and keeps the root itself.
    pub fn destroy(&mut self, key: NodeKey) {
        if !self.nodes.contains_key(key) {
            return;
        }

        if let Some(parent) = self.nodes[key].parent {
            self.nodes[parent].children.retain(|&c| c != key);
        }

        let mut pending = std::mem::take(&mut self.nodes[key].children);
        if key != self.root {
            self.nodes.remove(key);
        }

        let mut released = 0usize;
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(next) {
                pending.extend(node.children);
                released += 1;
            }
        }
        debug!("Destroyed node {:?} and {} descendants", key, released);
    }

    //=== Traversal =======================================================

    /// Advances the tree rooted at the graph root by `dt`.
    pub fn update(&mut self, dt: Duration) {
        self.update_from(self.root, dt);
    }

    /// Advances the subtree rooted at `key`: the node first, then its
    /// children in order.
    pub fn update_from(&mut self, key: NodeKey, dt: Duration) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };
        node.update_current(dt);

        for index in 0..self.nodes[key].children.len() {
            let child = self.nodes[key].children[index];
            self.update_from(child, dt);
        }
    }

    /// Draws the tree rooted at the graph root.
    pub fn draw(&self, target: &mut dyn RenderTarget, states: &RenderStates) {
        self.draw_from(self.root, target, states);
    }

    /// Draws `key` with `parent_states` composed with its local transform,
    /// then its children on top.
    pub fn draw_from(&self, key: NodeKey, target: &mut dyn RenderTarget, parent_states: &RenderStates) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        let states = parent_states.combined(node.transform().matrix());
        node.draw_current(target, &states);

        for &child in node.children() {
            self.draw_from(child, target, &states);
        }
    }

    /// Offers `command` to every node reachable from the root.
    pub fn dispatch(&mut self, command: &Command, dt: Duration) {
        self.dispatch_from(self.root, command, dt);
    }

    /// Offers `command` to `key` and then its descendants, depth-first.
    /// Nodes whose category shares no bit with the command are skipped.
    pub fn dispatch_from(&mut self, key: NodeKey, command: &Command, dt: Duration) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };
        if node.category().accepts(command.category()) {
            command.execute(node, dt);
        }

        for index in 0..self.nodes[key].children.len() {
            let child = self.nodes[key].children[index];
            self.dispatch_from(child, command, dt);
        }
    }

    //=== Queries =========================================================

    /// Local-to-world matrix of `key`: ancestor transforms composed from
    /// the root down. Computed on demand.
    ///
    /// # Panics
    ///
    /// Panics if `key` is stale.
    #[track_caller]
    pub fn world_transform(&self, key: NodeKey) -> Affine2 {
        let mut transform = Affine2::IDENTITY;
        let mut current = Some(key);
        while let Some(k) = current {
            let node = &self[k];
            transform = node.transform().matrix() * transform;
            current = node.parent();
        }
        transform
    }

    /// World-space position of the node's local origin.
    #[track_caller]
    pub fn world_position(&self, key: NodeKey) -> Vec2 {
        self.world_transform(key).transform_point2(Vec2::ZERO)
    }

    //=== Helpers =========================================================

    fn require(&self, key: NodeKey) -> CoreResult<()> {
        if self.nodes.contains_key(key) {
            Ok(())
        } else {
            Err(CoreError::UnknownNode(format!("{:?}", key)))
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeKey, key: NodeKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            if k == candidate {
                return true;
            }
            current = self.nodes.get(k).and_then(SceneNode::parent);
        }
        false
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<NodeKey> for SceneGraph {
    type Output = SceneNode;

    #[track_caller]
    fn index(&self, key: NodeKey) -> &SceneNode {
        match self.nodes.get(key) {
            Some(node) => node,
            None => panic!("{}", CoreError::UnknownNode(format!("{:?}", key))),
        }
    }
}

impl IndexMut<NodeKey> for SceneGraph {
    #[track_caller]
    fn index_mut(&mut self, key: NodeKey) -> &mut SceneNode {
        match self.nodes.get_mut(key) {
            Some(node) => node,
            None => panic!("{}", CoreError::UnknownNode(format!("{:?}", key))),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
