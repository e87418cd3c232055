//=========================================================================
// Platform Bridge
//
// Bridges Winit window events with the application's event inbox.
//
// Architecture:
// ```text
//  Host (winit event loop):            Application:
//  ┌──────────────────────────┐       ┌──────────────────────┐
//  │  WindowEvent             │       │  advance(dt)         │
//  │   ↓                      │       │   ├─ drain inbox     │
//  │  PlatformBridge          │       │   ├─ InputState      │
//  │   ├─ InputProcessor      │       │   └─ StateStack      │
//  │   └─ frame batch         │       │                      │
//  │   ↓ RedrawRequested      │       └──────────────────────┘
//  │  crossbeam Sender ───────┼──────────────↑
//  └──────────────────────────┘        PlatformEvent
// ```
//
// Frame boundary is `RedrawRequested`: every input buffered since the
// previous redraw is sent as one `PlatformEvent::Inputs` batch, in
// arrival order. Empty batches are not sent. Consecutive duplicates are
// dropped and consecutive mouse moves collapse into the latest one.
// Losing focus flushes the batch and then sends `FocusLost`, since key
// releases that happen while unfocused never reach the window.
//
// The host owns the window and the event loop; the bridge only
// translates and forwards.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use winit::event::WindowEvent;

//=== Internal Imports ====================================================

use crate::core::input::InputEvent;
pub use input_processor::InputProcessor;

//=== PlatformEvent =======================================================

/// Messages sent from the platform side to the [`Application`] inbox.
///
/// [`Application`]: crate::Application
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// Input collected during one frame, in arrival order.
    Inputs(Vec<InputEvent>),

    /// The window lost keyboard focus. Every held key and button counts
    /// as released.
    FocusLost,

    /// Window close requested by the user or the OS. The application
    /// stops on its next step.
    WindowClosed,
}

//=== PlatformBridge ======================================================

/// Translates winit window events and forwards them in per-frame batches.
pub struct PlatformBridge {
    batch: Vec<InputEvent>,
    event_sender: Sender<PlatformEvent>,
    input_processor: InputProcessor,
}

impl PlatformBridge {
    //--- Construction -----------------------------------------------------

    pub fn new(event_sender: Sender<PlatformEvent>) -> Self {
        info!(target: "platform", "Platform bridge initialized");
        Self {
            batch: Vec::with_capacity(64),
            event_sender,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Event Handling ---------------------------------------------------

    /// Handles one window event. Returns `false` once the window should
    /// close, so the host can exit its event loop.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.close();
                return false;
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self
                    .input_processor
                    .process_mouse_move(position.x as f32, position.y as f32);
                self.push(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key_event(key_event) {
                    Some(event) => self.push(event),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.push(event);
            }

            WindowEvent::Focused(false) => {
                debug!(target: "platform", "Window lost focus");
                self.flush();
                if self.event_sender.send(PlatformEvent::FocusLost).is_err() {
                    debug!(target: "platform", "Application gone, focus loss not sent");
                }
            }

            WindowEvent::RedrawRequested => self.flush(),

            _ => {}
        }
        true
    }

    /// Buffers one translated event until the next frame boundary.
    pub fn push(&mut self, event: InputEvent) {
        if let Some(last) = self.batch.last_mut() {
            if *last == event {
                return;
            }
            if matches!(last, InputEvent::MouseMoved { .. })
                && matches!(event, InputEvent::MouseMoved { .. })
            {
                *last = event;
                return;
            }
        }
        self.batch.push(event);
    }

    /// Sends the buffered batch, if any.
    ///
    /// A disconnected inbox drops the batch with a warning; the host keeps
    /// running so the window can still be closed.
    pub fn flush(&mut self) {
        if self.batch.is_empty() {
            return;
        }

        let batch = std::mem::take(&mut self.batch);
        let count = batch.len();
        trace!(target: "platform::input", "Flushing {} events", count);

        if self.event_sender.send(PlatformEvent::Inputs(batch)).is_err() {
            warn!(
                target: "platform::input",
                "Channel disconnected, dropping {} events",
                count
            );
        }
    }

    /// Flushes pending input, then tells the application to stop.
    pub fn close(&mut self) {
        self.flush();
        if self.event_sender.send(PlatformEvent::WindowClosed).is_err() {
            debug!(target: "platform", "Application already gone at close");
        }
    }

    pub fn pending(&self) -> &[InputEvent] {
        &self.batch
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
