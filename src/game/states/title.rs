//=========================================================================
// Title State
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::render::{Drawable, RenderStates, RenderTarget, Sprite, Text};
use crate::core::resources::{FontId, TextureId};
use crate::core::state::{Context, PendingChanges, State};
use crate::game::StateId;

//=== TitleState ==========================================================

/// Title screen with a blinking prompt; any key opens the menu.
pub struct TitleState {
    background: Sprite,
    prompt: Text,
    show_prompt: bool,
    blink_timer: Duration,
}

impl TitleState {
    /// Time the prompt stays visible (or hidden) before toggling.
    pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

    pub fn new(context: Context<'_>) -> Self {
        let prompt = Text::new("Press any key to start", context.fonts.get(FontId::Main))
            .centered()
            .at(context.view_size / 2.0);

        Self {
            background: Sprite::new(context.textures.get(TextureId::TitleScreen)),
            prompt,
            show_prompt: true,
            blink_timer: Duration::ZERO,
        }
    }

    pub fn is_prompt_visible(&self) -> bool {
        self.show_prompt
    }
}

impl State<StateId> for TitleState {
    fn draw(&self, target: &mut dyn RenderTarget) {
        let view = target.default_view();
        target.set_view(&view);
        target.draw(Drawable::Sprite(&self.background), &RenderStates::DEFAULT);
        if self.show_prompt {
            target.draw(Drawable::Text(&self.prompt), &RenderStates::DEFAULT);
        }
    }

    fn update(&mut self, dt: Duration, _changes: &mut PendingChanges<StateId>) -> bool {
        self.blink_timer += dt;
        if self.blink_timer >= Self::BLINK_INTERVAL {
            self.show_prompt = !self.show_prompt;
            self.blink_timer = Duration::ZERO;
        }
        true
    }

    fn handle_event(&mut self, event: &InputEvent, changes: &mut PendingChanges<StateId>) -> bool {
        if event.pressed_key().is_some() {
            changes.request_pop();
            changes.request_push(StateId::Menu);
        }
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
