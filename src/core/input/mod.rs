//=========================================================================
// Input Model
//
// Engine-level input vocabulary and the held-key tracker.
//
// Responsibilities:
// - Represent keyboard and mouse events independently of the platform
// - Track which keys are currently held for realtime queries
//
// Notes:
// Mapping keys to gameplay actions is the player's job (see
// `game::player`); this module only knows keys, not actions.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod input_state;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use input_state::{InputState, RealtimeInput};
