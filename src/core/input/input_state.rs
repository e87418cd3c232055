//=========================================================================
// Input State
//=========================================================================
//
// Persistent "what is held right now" snapshot fed from the event stream.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys/buttons held) → query
//
// The game state polls it through `RealtimeInput` every update so that
// held movement keys keep producing commands between key events.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::collections::HashSet;

use log::trace;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== RealtimeInput =======================================================

/// Realtime keyboard query.
pub trait RealtimeInput {
    /// Returns `true` while `key` is held.
    fn is_key_down(&self, key: KeyCode) -> bool;
}

//=== InputState ==========================================================

/// Tracks held keys, held mouse buttons and the last cursor position.
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Event Processing -------------------------------------------------

    /// Applies a batch of events in order.
    pub fn process_events<'a>(&mut self, events: impl IntoIterator<Item = &'a InputEvent>) {
        for event in events {
            self.process_event(event);
        }
    }

    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                self.keys_down.insert(*key);
            }
            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                self.keys_down.remove(key);
            }
            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = *modifiers;
                self.mouse_buttons_down.insert(*button);
            }
            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = *modifiers;
                self.mouse_buttons_down.remove(button);
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (*x, *y);
            }
            InputEvent::Unidentified => trace!("Ignoring unidentified input event"),
        }
    }

    /// Forgets everything held, e.g. after the window loses focus.
    pub fn clear(&mut self) {
        self.keys_down.clear();
        self.mouse_buttons_down.clear();
        self.modifiers = Modifiers::NONE;
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Modifier state carried by the most recent key or button event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

impl RealtimeInput for InputState {
    fn is_key_down(&self, key: KeyCode) -> bool {
        InputState::is_key_down(self, key)
    }
}

/// Lets a driver keep feeding the tracker while states hold a shared
/// reference to it.
impl RealtimeInput for RefCell<InputState> {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.borrow().is_key_down(key)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
