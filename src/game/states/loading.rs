//=========================================================================
// Loading State
//=========================================================================
//
// Progress screen that hands over to the game once its task finishes.
// Not part of the menu flow; push `StateId::Loading` to use it.
//
// The work runs as a cooperative `LoadingTask` advanced by each update;
// nothing here spawns a thread.
//
//   update(dt) → task.advance(dt) → finished ? Pop + Push(Game)
//                                            : resize progress bar
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::render::{Color, Drawable, RectangleShape, RenderStates, RenderTarget, Text};
use crate::core::resources::FontId;
use crate::core::state::{Context, PendingChanges, State};
use crate::game::StateId;

//=== LoadingTask =========================================================

/// Time-sliced unit of work with a known total duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingTask {
    elapsed: Duration,
    duration: Duration,
}

impl LoadingTask {
    pub const DEFAULT_DURATION: Duration = Duration::from_secs(10);

    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// Performs `dt` worth of work.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Fraction of the work done, in `[0, 1]`.
    pub fn completion(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

impl Default for LoadingTask {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DURATION)
    }
}

//=== LoadingState ========================================================

pub struct LoadingState {
    loading_text: Text,
    bar_background: RectangleShape,
    bar: RectangleShape,
    task: LoadingTask,
}

impl LoadingState {
    const BAR_HEIGHT: f32 = 10.0;
    const BAR_MARGIN: f32 = 10.0;

    pub fn new(context: Context<'_>) -> Self {
        Self::with_task(context, LoadingTask::default())
    }

    pub fn with_task(context: Context<'_>, task: LoadingTask) -> Self {
        let size = context.view_size;
        let text_position = Vec2::new(size.x / 2.0, size.y / 2.0 + 50.0);
        let bar_position = Vec2::new(Self::BAR_MARGIN, text_position.y + 40.0);

        let mut state = Self {
            loading_text: Text::new("Loading Resources", context.fonts.get(FontId::Main))
                .centered()
                .at(text_position),
            bar_background: RectangleShape::new(
                bar_position,
                Vec2::new((size.x - 2.0 * Self::BAR_MARGIN).max(0.0), Self::BAR_HEIGHT),
                Color::WHITE,
            ),
            bar: RectangleShape::new(
                bar_position,
                Vec2::new(0.0, Self::BAR_HEIGHT),
                Color::rgb(100, 100, 100),
            ),
            task,
        };
        state.set_completion(0.0);
        state
    }

    /// Width of the progress bar relative to its background. A view too
    /// narrow to show the bar reports the task's own completion.
    pub fn completion(&self) -> f32 {
        let full = self.bar_background.size.x;
        if full <= 0.0 {
            return self.task.completion();
        }
        self.bar.size.x / full
    }

    fn set_completion(&mut self, percent: f32) {
        let percent = percent.clamp(0.0, 1.0);
        self.bar.size.x = self.bar_background.size.x * percent;
    }
}

impl State<StateId> for LoadingState {
    fn draw(&self, target: &mut dyn RenderTarget) {
        let view = target.default_view();
        target.set_view(&view);
        target.draw(Drawable::Text(&self.loading_text), &RenderStates::DEFAULT);
        target.draw(Drawable::Rectangle(&self.bar_background), &RenderStates::DEFAULT);
        target.draw(Drawable::Rectangle(&self.bar), &RenderStates::DEFAULT);
    }

    fn update(&mut self, dt: Duration, changes: &mut PendingChanges<StateId>) -> bool {
        self.task.advance(dt);
        if self.task.is_finished() {
            changes.request_pop();
            changes.request_push(StateId::Game);
        } else {
            self.set_completion(self.task.completion());
        }
        true
    }

    fn handle_event(&mut self, _event: &InputEvent, _changes: &mut PendingChanges<StateId>) -> bool {
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
