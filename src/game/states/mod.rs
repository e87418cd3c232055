//=========================================================================
// Game States
//=========================================================================
//
// One module per mode. Every state is built from a `Context` by the
// factory registered in `game::register_states`.
//
//=========================================================================

//=== Module Declarations =================================================

mod game;
mod loading;
mod menu;
mod pause;
mod title;

//=== Public API ==========================================================

pub use game::GameState;
pub use loading::{LoadingState, LoadingTask};
pub use menu::{MenuOption, MenuState};
pub use pause::PauseState;
pub use title::TitleState;

//=========================================================================
// Test Support
//=========================================================================
