//=========================================================================
// Game Layer
//=========================================================================
//
// Concrete modes and the gameplay world built on the core systems.
//
// State flow:
//   Title ──any key──> Menu ──Play──> Game ⇄ Pause
//                        └──Exit──> (empty stack, shutdown)
//   Pause ──Backspace──> Menu
//   Loading ──done──> Game   (registered, pushed only on request)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::state::{StateKey, StateStack};

//=== Module Declarations =================================================

pub mod states;
pub mod world;

//=== Public API ==========================================================

pub use states::{GameState, LoadingState, LoadingTask, MenuOption, MenuState, PauseState, TitleState};
pub use world::{Layer, World, WorldConfig};

//=== StateId =============================================================

/// Identifiers of the game's modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    Title,
    Menu,
    Loading,
    Game,
    Pause,
}

impl StateKey for StateId {}

/// Registers a factory for every [`StateId`].
pub fn register_states(stack: &mut StateStack<'_, StateId>) {
    stack.register_state(StateId::Title, TitleState::new);
    stack.register_state(StateId::Menu, MenuState::new);
    stack.register_state(StateId::Loading, LoadingState::new);
    stack.register_state(StateId::Game, GameState::new);
    stack.register_state(StateId::Pause, PauseState::new);
}

//=========================================================================
// Unit Tests
//=========================================================================
