//=========================================================================
// State System
//=========================================================================
//
// Mutually exclusive application modes managed as a stack.
//
// Architecture:
//   StateStack<K>
//     ├─ stack:     Vec<(K, Box<dyn State<K>>)>   (bottom → top)
//     ├─ pending:   PendingChanges<K>             (Push / Pop / Clear, FIFO)
//     └─ factories: HashMap<K, Factory>           (captures the Context)
//
// Flow:
//   handle_event() / update() → top-down walk, early stop on `false`
//                             → apply_pending_changes()
//   draw()                    → bottom-up walk
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, RealtimeInput};
use crate::core::player::Player;
use crate::core::render::RenderTarget;
use crate::core::resources::{FontHolder, TextureHolder};

//=== Module Declarations =================================================

mod pending;
mod state_stack;

//=== Public API ==========================================================

pub use pending::{PendingChange, PendingChanges};
pub use state_stack::StateStack;

//=== State Key Trait =====================================================

/// Marker trait for state identifiers.
///
/// Typically implemented by a game-specific enum.
pub trait StateKey: Clone + Copy + Eq + Hash + Debug + 'static {}

//=== Context =============================================================

/// Shared, non-owning services handed to every state at construction.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub textures: &'a TextureHolder,
    pub fonts: &'a FontHolder,
    pub player: &'a Player,
    pub input: &'a dyn RealtimeInput,

    /// Size of the window's default view, in pixels.
    pub view_size: Vec2,
}

//=== State Trait =========================================================

/// One application mode.
///
/// `update` and `handle_event` return whether the states below should
/// also receive the call. Stack changes are requested through `changes`
/// and applied once the walk has finished.
pub trait State<K: StateKey> {
    fn draw(&self, target: &mut dyn RenderTarget);

    fn update(&mut self, dt: Duration, changes: &mut PendingChanges<K>) -> bool;

    fn handle_event(&mut self, event: &InputEvent, changes: &mut PendingChanges<K>) -> bool;
}
