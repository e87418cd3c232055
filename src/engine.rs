//=========================================================================
// Aetheric Skies
//
// Headless fixed-timestep driver tying the platform event stream, the
// input tracker and the state stack together.
//
// Architecture:
// ```text
//     ApplicationBuilder ──build(&resources)──> Application ──advance(dt)──> TickControl
//         │                                        │
//         ├─ with_tps()                             ├─ event_sender()  (platform side)
//         ├─ with_channel_capacity()                ├─ render(target)  (once per frame)
//         └─ with_max_steps_per_frame()             └─ stack()
// ```
//
// Per fixed step:
//   1. drain the inbox (non-blocking)
//        Inputs(batch) → InputState::process_event → StateStack::handle_event
//        FocusLost     → InputState::clear
//        WindowClosed  → stop
//   2. StateStack::update(step)
//   3. empty stack → stop
//
// Per frame, `render` draws the stack bottom to top, then the frame
// statistics ("FPS: N", refreshed once per second of real time) through
// the target's default view.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use glam::Vec2;
use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::input::InputState;
use crate::core::player::Player;
use crate::core::render::{Drawable, RenderStates, RenderTarget, Text};
use crate::core::resources::{Font, FontHolder, FontId, TextureHolder};
use crate::core::state::{Context, StateStack};
use crate::game::{self, StateId};
use crate::platform::PlatformEvent;

//=== TickControl =========================================================

/// Loop control signal returned by [`Application::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== ApplicationResources ================================================

/// Everything the states borrow through their [`Context`].
///
/// Owned by the host and outlives the [`Application`] built from it.
pub struct ApplicationResources {
    pub textures: TextureHolder,
    pub fonts: FontHolder,
    pub player: Player,
    pub input: RefCell<InputState>,
    pub view_size: Vec2,
}

impl ApplicationResources {
    pub fn new(textures: TextureHolder, fonts: FontHolder, view_size: Vec2) -> Self {
        Self {
            textures,
            fonts,
            player: Player::new(),
            input: RefCell::new(InputState::new()),
            view_size,
        }
    }

    /// Replaces the default player (custom speed or bindings).
    pub fn with_player(mut self, player: Player) -> Self {
        self.player = player;
        self
    }

    fn context(&self) -> Context<'_> {
        Context {
            textures: &self.textures,
            fonts: &self.fonts,
            player: &self.player,
            input: &self.input,
            view_size: self.view_size,
        }
    }
}

//=== FrameStatistics =====================================================

/// Frames-per-second counter drawn in the top-left corner.
struct FrameStatistics {
    text: Text,
    update_time: Duration,
    frames: u32,
}

impl FrameStatistics {
    const POSITION: Vec2 = Vec2::new(5.0, 5.0);
    const CHARACTER_SIZE: u32 = 10;
    const INTERVAL: Duration = Duration::from_secs(1);

    fn new(font: &Font) -> Self {
        Self {
            text: Text::new("", font)
                .at(Self::POSITION)
                .with_size(Self::CHARACTER_SIZE),
            update_time: Duration::ZERO,
            frames: 0,
        }
    }

    /// Counts one frame that took `elapsed` of real time.
    fn record_frame(&mut self, elapsed: Duration) {
        self.update_time += elapsed;
        self.frames += 1;

        if self.update_time >= Self::INTERVAL {
            self.text.string = format!("FPS: {}", self.frames);
            self.update_time -= Self::INTERVAL;
            self.frames = 0;
        }
    }

    /// Nothing is drawn until the first full interval has elapsed.
    fn draw(&self, target: &mut dyn RenderTarget) {
        if self.text.string.is_empty() {
            return;
        }
        let view = target.default_view();
        target.set_view(&view);
        target.draw(Drawable::Text(&self.text), &RenderStates::DEFAULT);
    }
}

//=== ApplicationBuilder ==================================================

/// Builder for configuring and constructing an [`Application`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (fixed updates per second)
/// - **Channel capacity**: 128 platform events
/// - **Max steps per frame**: 5
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use aetheric_skies::prelude::*;
///
/// # fn load() -> ApplicationResources { unimplemented!() }
/// # fn present(_: &mut Application<'_>) {}
/// let resources = load();
/// let mut app = ApplicationBuilder::new()
///     .with_tps(120.0)
///     .with_channel_capacity(256)
///     .build(&resources);
///
/// while app.advance(Duration::from_millis(16)) == TickControl::Continue {
///     present(&mut app);
/// }
/// ```
pub struct ApplicationBuilder {
    tps: f64,
    channel_capacity: usize,
    max_steps_per_frame: u32,
}

impl ApplicationBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            max_steps_per_frame: 5,
        }
    }

    /// Sets the number of fixed updates per simulated second.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the capacity of the platform → core event channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Caps the fixed steps run by a single `advance` call. Time beyond
    /// the cap is dropped instead of being caught up later.
    ///
    /// # Panics
    ///
    /// Panics if `steps == 0`.
    pub fn with_max_steps_per_frame(mut self, steps: u32) -> Self {
        assert!(steps > 0, "Max steps per frame must be positive");
        self.max_steps_per_frame = steps;
        self
    }

    /// Builds the application, registers every game state and pushes the
    /// title screen.
    ///
    /// # Panics
    ///
    /// Panics if `resources.fonts` has no [`FontId::Main`].
    pub fn build(self, resources: &ApplicationResources) -> Application<'_> {
        info!(
            "Building application (TPS: {}, channel: {}, max steps: {})",
            self.tps, self.channel_capacity, self.max_steps_per_frame
        );

        let (sender, receiver) = bounded(self.channel_capacity);
        let statistics = FrameStatistics::new(resources.fonts.get(FontId::Main));

        let mut stack = StateStack::new(resources.context());
        game::register_states(&mut stack);
        stack.push_state(StateId::Title);
        stack.apply_pending_changes();

        Application {
            stack,
            input: &resources.input,
            sender,
            receiver,
            step: Duration::from_secs_f64(1.0 / self.tps),
            accumulator: Duration::ZERO,
            max_steps_per_frame: self.max_steps_per_frame,
            running: true,
            statistics,
        }
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Application =========================================================

/// Fixed-timestep driver over the game's [`StateStack`].
pub struct Application<'a> {
    stack: StateStack<'a, StateId>,
    input: &'a RefCell<InputState>,
    sender: Sender<PlatformEvent>,
    receiver: Receiver<PlatformEvent>,
    step: Duration,
    accumulator: Duration,
    max_steps_per_frame: u32,
    running: bool,
    statistics: FrameStatistics,
}

impl<'a> Application<'a> {
    //--- Accessors --------------------------------------------------------

    /// Sender for the platform side. May be cloned onto other threads.
    pub fn event_sender(&self) -> Sender<PlatformEvent> {
        self.sender.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stack(&self) -> &StateStack<'a, StateId> {
        &self.stack
    }

    /// Duration of one fixed step.
    pub fn step(&self) -> Duration {
        self.step
    }

    //--- Frame Driving ----------------------------------------------------

    /// Accumulates `elapsed` and runs one fixed step per whole quantum.
    ///
    /// Call once per host frame with the real time since the previous
    /// call; each call counts as one frame in the statistics.
    pub fn advance(&mut self, elapsed: Duration) -> TickControl {
        if !self.running {
            return TickControl::Exit;
        }

        self.statistics.record_frame(elapsed);
        self.accumulator += elapsed;
        let mut steps = 0;

        while self.accumulator >= self.step {
            if steps == self.max_steps_per_frame {
                debug!(
                    "Dropping {:?} of accumulated time after {} steps",
                    self.accumulator, steps
                );
                self.accumulator = Duration::ZERO;
                break;
            }

            self.accumulator -= self.step;
            steps += 1;

            if self.tick() == TickControl::Exit {
                self.shutdown();
                return TickControl::Exit;
            }
        }

        trace!("Advanced {:?} in {} steps", elapsed, steps);
        TickControl::Continue
    }

    /// Draws every live state, bottom to top, then the frame statistics.
    pub fn render(&self, target: &mut dyn RenderTarget) {
        self.stack.draw(target);
        self.statistics.draw(target);
    }

    //--- Internal Helpers -------------------------------------------------

    fn tick(&mut self) -> TickControl {
        if self.drain_inbox() == TickControl::Exit {
            return TickControl::Exit;
        }

        self.stack.update(self.step);

        if self.stack.is_empty() {
            info!("State stack is empty");
            return TickControl::Exit;
        }
        TickControl::Continue
    }

    fn drain_inbox(&mut self) -> TickControl {
        loop {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::Inputs(batch)) => {
                    for event in &batch {
                        self.input.borrow_mut().process_event(event);
                        self.stack.handle_event(event);
                    }
                }
                Ok(PlatformEvent::FocusLost) => {
                    debug!("Focus lost, releasing held input");
                    self.input.borrow_mut().clear();
                }
                Ok(PlatformEvent::WindowClosed) => {
                    info!("Window closed");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => return TickControl::Continue,
                Err(TryRecvError::Disconnected) => {
                    warn!("Platform channel disconnected");
                    return TickControl::Exit;
                }
            }
        }
    }

    fn shutdown(&mut self) {
        self.running = false;
        self.accumulator = Duration::ZERO;
        info!("Application shut down");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, RealtimeInput};
    use crate::core::render::testing::RecordingTarget;
    use crate::core::render::View;
    use crate::core::resources::{Texture, TextureId};

    fn resources() -> ApplicationResources {
        let mut textures = TextureHolder::new();
        textures.insert(TextureId::Eagle, Texture::new("Eagle.png", 48, 64));
        textures.insert(TextureId::Raptor, Texture::new("Raptor.png", 60, 50));
        textures.insert(TextureId::Desert, Texture::new("Desert.png", 512, 512));
        textures.insert(TextureId::TitleScreen, Texture::new("TitleScreen.png", 640, 480));

        let mut fonts = FontHolder::new();
        fonts.insert(FontId::Main, Font::new("Sansation.ttf"));

        ApplicationResources::new(textures, fonts, Vec2::new(640.0, 480.0))
    }

    fn press(app: &Application<'_>, key: KeyCode) {
        app.event_sender()
            .send(PlatformEvent::Inputs(vec![InputEvent::key_down(key), InputEvent::key_up(key)]))
            .unwrap();
    }

    //=====================================================================
    // Builder
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = ApplicationBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.max_steps_per_frame, 5);
    }

    #[test]
    fn builder_custom_values() {
        let builder = ApplicationBuilder::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .with_max_steps_per_frame(3);
        assert_eq!(builder.tps, 120.0);
        assert_eq!(builder.channel_capacity, 256);
        assert_eq!(builder.max_steps_per_frame, 3);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_rejects_zero_tps() {
        ApplicationBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_rejects_zero_capacity() {
        ApplicationBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn build_starts_on_title() {
        let resources = resources();
        let app = ApplicationBuilder::new().build(&resources);
        assert!(app.is_running());
        assert_eq!(app.stack().current(), Some(StateId::Title));
        assert_eq!(app.step(), Duration::from_secs_f64(1.0 / 60.0));
    }

    //=====================================================================
    // Fixed Step
    //=====================================================================

    #[test]
    fn events_wait_for_a_whole_step() {
        let resources = resources();
        let mut app = ApplicationBuilder::new().with_tps(10.0).build(&resources);
        press(&app, KeyCode::Space);

        assert_eq!(app.advance(Duration::from_millis(50)), TickControl::Continue);
        assert_eq!(app.stack().current(), Some(StateId::Title));

        app.advance(Duration::from_millis(50));
        assert_eq!(app.stack().current(), Some(StateId::Menu));
    }

    #[test]
    fn excess_time_is_dropped() {
        let resources = resources();
        let mut app = ApplicationBuilder::new()
            .with_tps(10.0)
            .with_max_steps_per_frame(2)
            .build(&resources);

        app.advance(Duration::from_secs(10));
        press(&app, KeyCode::Space);

        // Nothing carried over: a partial step runs no update.
        app.advance(Duration::from_millis(50));
        assert_eq!(app.stack().current(), Some(StateId::Title));
    }

    #[test]
    fn input_state_tracks_batches() {
        let resources = resources();
        let mut app = ApplicationBuilder::new().build(&resources);
        app.event_sender()
            .send(PlatformEvent::Inputs(vec![InputEvent::key_down(KeyCode::ArrowLeft)]))
            .unwrap();

        app.advance(app.step());
        assert!(resources.input.is_key_down(KeyCode::ArrowLeft));
    }

    #[test]
    fn focus_loss_releases_held_keys() {
        let resources = resources();
        let mut app = ApplicationBuilder::new().build(&resources);
        let sender = app.event_sender();
        sender
            .send(PlatformEvent::Inputs(vec![InputEvent::key_down(KeyCode::ArrowRight)]))
            .unwrap();
        app.advance(app.step());
        assert!(resources.input.is_key_down(KeyCode::ArrowRight));

        sender.send(PlatformEvent::FocusLost).unwrap();
        assert_eq!(app.advance(app.step()), TickControl::Continue);
        assert!(!resources.input.is_key_down(KeyCode::ArrowRight));
    }

    #[test]
    fn input_after_focus_loss_is_tracked_again() {
        let resources = resources();
        let mut app = ApplicationBuilder::new().build(&resources);
        let sender = app.event_sender();
        sender
            .send(PlatformEvent::Inputs(vec![InputEvent::key_down(KeyCode::ArrowUp)]))
            .unwrap();
        sender.send(PlatformEvent::FocusLost).unwrap();
        sender
            .send(PlatformEvent::Inputs(vec![InputEvent::key_down(KeyCode::ArrowDown)]))
            .unwrap();

        app.advance(app.step());
        assert!(!resources.input.is_key_down(KeyCode::ArrowUp));
        assert!(resources.input.is_key_down(KeyCode::ArrowDown));
    }

    //=====================================================================
    // Shutdown
    //=====================================================================

    #[test]
    fn window_close_exits() {
        let resources = resources();
        let mut app = ApplicationBuilder::new().build(&resources);
        app.event_sender().send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(app.advance(app.step()), TickControl::Exit);
        assert!(!app.is_running());
        assert_eq!(app.advance(app.step()), TickControl::Exit);
    }

    #[test]
    fn menu_exit_empties_stack_and_exits() {
        let resources = resources();
        let mut app = ApplicationBuilder::new().build(&resources);
        press(&app, KeyCode::Space);
        app.advance(app.step());
        assert_eq!(app.stack().current(), Some(StateId::Menu));

        press(&app, KeyCode::ArrowDown);
        press(&app, KeyCode::Enter);
        assert_eq!(app.advance(app.step()), TickControl::Exit);
        assert!(app.stack().is_empty());
    }

    #[test]
    fn render_draws_title() {
        let resources = resources();
        let app = ApplicationBuilder::new().build(&resources);
        let mut target = RecordingTarget::new(640.0, 480.0);
        app.render(&mut target);
        assert_eq!(target.texts(), vec!["Press any key to start"]);
    }

    //=====================================================================
    // Frame Statistics
    //=====================================================================

    #[test]
    fn statistics_hidden_before_first_second() {
        let resources = resources();
        let mut app = ApplicationBuilder::new().build(&resources);
        for _ in 0..3 {
            app.advance(Duration::from_millis(300));
        }

        let mut target = RecordingTarget::new(640.0, 480.0);
        app.render(&mut target);
        assert!(!target.texts().iter().any(|t| t.starts_with("FPS")));
    }

    #[test]
    fn statistics_count_frames_per_second() {
        let resources = resources();
        let mut app = ApplicationBuilder::new().build(&resources);
        for _ in 0..4 {
            app.advance(Duration::from_millis(250));
        }

        let mut target = RecordingTarget::new(640.0, 480.0);
        app.render(&mut target);
        assert_eq!(target.texts().last(), Some(&"FPS: 4"));
    }

    #[test]
    fn statistics_drawn_last_through_default_view() {
        let resources = resources();
        let mut app = ApplicationBuilder::new().build(&resources);
        app.advance(Duration::from_secs(1));

        let mut target = RecordingTarget::new(640.0, 480.0);
        app.render(&mut target);
        assert_eq!(target.texts().last(), Some(&"FPS: 1"));
        assert_eq!(
            target.views.last(),
            Some(&View::from_size(Vec2::new(640.0, 480.0)))
        );
    }

    #[test]
    fn statistics_restart_after_each_interval() {
        let resources = resources();
        let mut app = ApplicationBuilder::new().build(&resources);
        app.advance(Duration::from_secs(1));
        for _ in 0..2 {
            app.advance(Duration::from_millis(500));
        }

        let mut target = RecordingTarget::new(640.0, 480.0);
        app.render(&mut target);
        assert_eq!(target.texts().last(), Some(&"FPS: 2"));
    }
}
