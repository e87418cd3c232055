//=========================================================================
// Pause State
//=========================================================================
//
// Translucent overlay pushed on top of the game. Blocks updates and
// events for the states below, so the world freezes but stays visible.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode};
use crate::core::render::{Color, Drawable, RectangleShape, RenderStates, RenderTarget, Text};
use crate::core::resources::FontId;
use crate::core::state::{Context, PendingChanges, State};
use crate::game::StateId;

//=== PauseState ==========================================================

pub struct PauseState {
    overlay: RectangleShape,
    paused_text: Text,
    instruction_text: Text,
}

impl PauseState {
    pub const OVERLAY_COLOR: Color = Color::rgba(0, 0, 0, 150);

    pub fn new(context: Context<'_>) -> Self {
        let font = context.fonts.get(FontId::Main);
        let size = context.view_size;

        Self {
            overlay: RectangleShape::new(Vec2::ZERO, size, Self::OVERLAY_COLOR),
            paused_text: Text::new("Game Paused", font)
                .with_size(70)
                .centered()
                .at(Vec2::new(0.5 * size.x, 0.4 * size.y)),
            instruction_text: Text::new("(Press Backspace to return to the main menu)", font)
                .centered()
                .at(Vec2::new(0.5 * size.x, 0.6 * size.y)),
        }
    }
}

impl State<StateId> for PauseState {
    fn draw(&self, target: &mut dyn RenderTarget) {
        let view = target.default_view();
        target.set_view(&view);
        target.draw(Drawable::Rectangle(&self.overlay), &RenderStates::DEFAULT);
        target.draw(Drawable::Text(&self.paused_text), &RenderStates::DEFAULT);
        target.draw(Drawable::Text(&self.instruction_text), &RenderStates::DEFAULT);
    }

    fn update(&mut self, _dt: Duration, _changes: &mut PendingChanges<StateId>) -> bool {
        false
    }

    fn handle_event(&mut self, event: &InputEvent, changes: &mut PendingChanges<StateId>) -> bool {
        match event.pressed_key() {
            Some(KeyCode::Escape) => changes.request_pop(),
            Some(KeyCode::Backspace) => {
                changes.request_clear();
                changes.request_push(StateId::Menu);
            }
            _ => {}
        }
        false
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
