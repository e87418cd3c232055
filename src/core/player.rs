//=========================================================================
// Player Input Translator
//=========================================================================
//
// Maps keyboard input to commands for the player's aircraft.
//
// Architecture:
//   KeyCode ──key_bindings──> PlayerAction ──action_bindings──> Command
//                                                                 │
//                                               CommandQueue::push┘
//
// Two entry points:
//   handle_event           : discrete key presses, non-realtime actions
//   handle_realtime_input  : held keys, realtime actions, every update
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::category::Category;
use crate::core::command::{Command, CommandQueue};
use crate::core::input::{InputEvent, KeyCode, RealtimeInput};
use crate::core::scene::Aircraft;

//=== PlayerAction ========================================================

/// Gameplay actions the player can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
}

impl PlayerAction {
    pub const ALL: [Self; 4] = [Self::MoveLeft, Self::MoveRight, Self::MoveUp, Self::MoveDown];

    /// Realtime actions fire every update while their key is held;
    /// the others fire once per key press.
    pub fn is_realtime(self) -> bool {
        match self {
            Self::MoveLeft | Self::MoveRight | Self::MoveUp | Self::MoveDown => true,
        }
    }

    /// Unit direction in screen space (y down).
    pub fn direction(self) -> Vec2 {
        match self {
            Self::MoveLeft => Vec2::NEG_X,
            Self::MoveRight => Vec2::X,
            Self::MoveUp => Vec2::NEG_Y,
            Self::MoveDown => Vec2::Y,
        }
    }
}

//=== Player ==============================================================

/// Translates keyboard input into commands for the player aircraft.
pub struct Player {
    key_bindings: HashMap<KeyCode, PlayerAction>,
    action_bindings: HashMap<PlayerAction, Command>,
    speed: f32,
}

impl Player {
    pub const DEFAULT_SPEED: f32 = 200.0;

    /// Player with arrow-key bindings and the default speed.
    pub fn new() -> Self {
        Self::with_speed(Self::DEFAULT_SPEED)
    }

    /// Player with arrow-key bindings moving at `speed` units per second.
    ///
    /// # Panics
    ///
    /// Panics if `speed` is not positive.
    pub fn with_speed(speed: f32) -> Self {
        assert!(speed > 0.0, "Player speed must be positive");

        let key_bindings = HashMap::from([
            (KeyCode::ArrowLeft, PlayerAction::MoveLeft),
            (KeyCode::ArrowRight, PlayerAction::MoveRight),
            (KeyCode::ArrowUp, PlayerAction::MoveUp),
            (KeyCode::ArrowDown, PlayerAction::MoveDown),
        ]);

        let action_bindings = PlayerAction::ALL
            .into_iter()
            .map(|action| (action, Self::movement_command(action.direction() * speed)))
            .collect();

        Self {
            key_bindings,
            action_bindings,
            speed,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    //--- Input Handling ---------------------------------------------------

    /// Pushes the command of a non-realtime action bound to a pressed key.
    pub fn handle_event(&self, event: &InputEvent, commands: &mut CommandQueue) {
        let Some(key) = event.pressed_key() else {
            return;
        };
        if let Some(&action) = self.key_bindings.get(&key) {
            if !action.is_realtime() {
                self.push_action(action, commands);
            }
        }
    }

    /// Pushes the command of every realtime action whose key is held.
    pub fn handle_realtime_input(&self, keyboard: &dyn RealtimeInput, commands: &mut CommandQueue) {
        for (&key, &action) in &self.key_bindings {
            if action.is_realtime() && keyboard.is_key_down(key) {
                self.push_action(action, commands);
            }
        }
    }

    //--- Bindings ---------------------------------------------------------

    /// Binds `key` to `action`, dropping every key previously bound to
    /// `action` and any action previously bound to `key`.
    pub fn assign_key(&mut self, action: PlayerAction, key: KeyCode) {
        self.key_bindings.retain(|_, bound| *bound != action);
        if let Some(previous) = self.key_bindings.insert(key, action) {
            debug!("Key {:?} rebound from {:?} to {:?}", key, previous, action);
        }
    }

    /// A key bound to `action`, if any.
    pub fn assigned_key(&self, action: PlayerAction) -> Option<KeyCode> {
        self.key_bindings
            .iter()
            .find_map(|(&key, &bound)| (bound == action).then_some(key))
    }

    //--- Helpers ----------------------------------------------------------

    fn push_action(&self, action: PlayerAction, commands: &mut CommandQueue) {
        if let Some(command) = self.action_bindings.get(&action) {
            commands.push(command.clone());
        }
    }

    fn movement_command(velocity: Vec2) -> Command {
        Command::for_node::<Aircraft, _>(Category::PLAYER_AIRCRAFT, move |aircraft, _| {
            aircraft.accelerate(velocity);
        })
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
