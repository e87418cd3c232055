//=========================================================================
// Menu State
//=========================================================================
//
// Play / Exit menu navigated with the arrow keys.
//
//   Up / Down : cycle the selection (wraps around)
//   Enter     : Play → Game, Exit → pop (empty stack ends the app)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode};
use crate::core::render::{Color, Drawable, RenderStates, RenderTarget, Sprite, Text};
use crate::core::resources::{FontId, TextureId};
use crate::core::state::{Context, PendingChanges, State};
use crate::game::StateId;

//=== MenuOption ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Play,
    Exit,
}

impl MenuOption {
    pub const ALL: [Self; 2] = [Self::Play, Self::Exit];

    pub fn label(self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::Exit => "Exit",
        }
    }
}

//=== MenuState ===========================================================

pub struct MenuState {
    background: Sprite,
    options: Vec<Text>,
    selected: usize,
}

impl MenuState {
    const OPTION_SPACING: f32 = 30.0;

    pub fn new(context: Context<'_>) -> Self {
        let font = context.fonts.get(FontId::Main);
        let first = context.view_size / 2.0;

        let options = MenuOption::ALL
            .iter()
            .enumerate()
            .map(|(row, option)| {
                Text::new(option.label(), font)
                    .centered()
                    .at(first + Vec2::new(0.0, Self::OPTION_SPACING * row as f32))
            })
            .collect();

        let mut menu = Self {
            background: Sprite::new(context.textures.get(TextureId::TitleScreen)),
            options,
            selected: 0,
        };
        menu.update_option_text();
        menu
    }

    pub fn selected_option(&self) -> MenuOption {
        MenuOption::ALL[self.selected]
    }

    /// Highlights the selected option in red, the rest in white.
    fn update_option_text(&mut self) {
        for (index, text) in self.options.iter_mut().enumerate() {
            text.color = if index == self.selected {
                Color::RED
            } else {
                Color::WHITE
            };
        }
    }
}

impl State<StateId> for MenuState {
    fn draw(&self, target: &mut dyn RenderTarget) {
        let view = target.default_view();
        target.set_view(&view);
        target.draw(Drawable::Sprite(&self.background), &RenderStates::DEFAULT);
        for text in &self.options {
            target.draw(Drawable::Text(text), &RenderStates::DEFAULT);
        }
    }

    fn update(&mut self, _dt: Duration, _changes: &mut PendingChanges<StateId>) -> bool {
        true
    }

    fn handle_event(&mut self, event: &InputEvent, changes: &mut PendingChanges<StateId>) -> bool {
        let Some(key) = event.pressed_key() else {
            return false;
        };

        let count = self.options.len();
        match key {
            KeyCode::Enter => match self.selected_option() {
                MenuOption::Play => {
                    changes.request_pop();
                    changes.request_push(StateId::Game);
                }
                MenuOption::Exit => changes.request_pop(),
            },
            KeyCode::ArrowUp => {
                self.selected = (self.selected + count - 1) % count;
                self.update_option_text();
            }
            KeyCode::ArrowDown => {
                self.selected = (self.selected + 1) % count;
                self.update_option_text();
            }
            _ => {}
        }
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
