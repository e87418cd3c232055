//=========================================================================
// Command System
//=========================================================================
//
// Category-addressed actions routed through the scene graph.
//
// Architecture:
//   Player / World ──push──> CommandQueue ──pop──> SceneGraph::dispatch
//                                                     │
//                      node.category ∩ command.category ≠ ∅ ?
//                                                     │
//                                            Command::execute(node, dt)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::category::Category;
use crate::core::error::CoreError;
use crate::core::scene::{NodeVariant, SceneNode};

//=== Module Declarations =================================================

mod command_queue;

//=== Public API ==========================================================

pub use command_queue::CommandQueue;

//=== Command =============================================================

type Action = Arc<dyn Fn(&mut SceneNode, Duration) + Send + Sync>;

/// An action addressed to every node whose category intersects
/// `category`.
///
/// Cloning shares the action; bindings keep one prototype per action and
/// push clones every frame.
#[derive(Clone)]
pub struct Command {
    category: Category,
    action: Action,
}

impl Command {
    /// Command acting on any node variant.
    pub fn new<F>(category: Category, action: F) -> Self
    where
        F: Fn(&mut SceneNode, Duration) + Send + Sync + 'static,
    {
        Self {
            category,
            action: Arc::new(action),
        }
    }

    /// Command bound to node variant `T`.
    ///
    /// The action receives the narrowed variant. Routing is still done by
    /// category alone, so the category must only select nodes of type `T`.
    ///
    /// # Panics
    ///
    /// Executing the command on a node that does not narrow to `T` panics
    /// with [`CoreError::TargetMismatch`]; that is a wiring error between
    /// categories and node types, not a runtime condition.
    ///
    /// # Examples
    ///
    /// ```
    /// # use aetheric_skies::prelude::*;
    /// # use glam::Vec2;
    /// let climb = Command::for_node::<Aircraft, _>(Category::PLAYER_AIRCRAFT, |aircraft, _| {
    ///     aircraft.accelerate(Vec2::new(0.0, -200.0));
    /// });
    /// assert_eq!(climb.category(), Category::PLAYER_AIRCRAFT);
    /// ```
    pub fn for_node<T, F>(category: Category, action: F) -> Self
    where
        T: NodeVariant,
        F: Fn(&mut T, Duration) + Send + Sync + 'static,
    {
        Self::new(category, move |node, dt| {
            let found = node.kind().name();
            match node.variant_mut::<T>() {
                Some(target) => action(target, dt),
                None => panic!(
                    "{}",
                    CoreError::TargetMismatch {
                        expected: T::NAME,
                        found,
                    }
                ),
            }
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Runs the action on `node`. Category filtering is the caller's job.
    pub fn execute(&self, node: &mut SceneNode, dt: Duration) {
        (self.action)(node, dt);
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
