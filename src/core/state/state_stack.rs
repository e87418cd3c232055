//=========================================================================
// State Stack
//=========================================================================
//
// Owns the live states, the pending-change queue and the factory registry.
//
// The live sequence is never mutated while it is being walked: states
// only queue requests, and the queue is applied after each walk in the
// order the requests were made.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::time::Duration;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Context, PendingChange, PendingChanges, State, StateKey};
use crate::core::error::{CoreError, CoreResult};
use crate::core::input::InputEvent;
use crate::core::render::RenderTarget;

//=== Types ===============================================================

type Factory<'a, K> = Box<dyn Fn() -> Box<dyn State<K> + 'a> + 'a>;

//=== StateStack ==========================================================

/// Stack machine of application modes with deferred mutation.
pub struct StateStack<'a, K: StateKey> {
    stack: Vec<(K, Box<dyn State<K> + 'a>)>,
    pending: PendingChanges<K>,
    factories: HashMap<K, Factory<'a, K>>,
    context: Context<'a>,
}

impl<'a, K: StateKey> StateStack<'a, K> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty stack whose factories will receive `context`.
    pub fn new(context: Context<'a>) -> Self {
        Self {
            stack: Vec::new(),
            pending: PendingChanges::new(),
            factories: HashMap::new(),
            context,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers the factory that builds state `id`.
    ///
    /// The factory runs every time `id` is pushed, so each push yields a
    /// fresh state.
    pub fn register_state<F, S>(&mut self, id: K, factory: F)
    where
        F: Fn(Context<'a>) -> S + 'a,
        S: State<K> + 'a,
    {
        let context = self.context;
        let factory: Factory<'a, K> =
            Box::new(move || -> Box<dyn State<K> + 'a> { Box::new(factory(context)) });
        if self.factories.insert(id, factory).is_some() {
            warn!("State {:?} was already registered and has been replaced", id);
        }
    }

    pub fn is_registered(&self, id: K) -> bool {
        self.factories.contains_key(&id)
    }

    //--- Requests ---------------------------------------------------------

    /// Queues a push of `id`, applied after the next walk.
    pub fn push_state(&mut self, id: K) {
        self.pending.request_push(id);
    }

    pub fn pop_state(&mut self) {
        self.pending.request_pop();
    }

    pub fn clear_states(&mut self) {
        self.pending.request_clear();
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Identifier of the top state.
    pub fn current(&self) -> Option<K> {
        self.stack.last().map(|(id, _)| *id)
    }

    /// Live state identifiers, bottom to top.
    pub fn ids(&self) -> impl Iterator<Item = K> + '_ {
        self.stack.iter().map(|(id, _)| *id)
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    //--- Per-frame --------------------------------------------------------

    /// Updates states from the top down until one returns `false`, then
    /// applies the requested changes.
    #[track_caller]
    pub fn update(&mut self, dt: Duration) {
        for (_, state) in self.stack.iter_mut().rev() {
            if !state.update(dt, &mut self.pending) {
                break;
            }
        }
        self.apply_pending_changes();
    }

    /// Offers `event` to states from the top down until one returns
    /// `false`, then applies the requested changes.
    #[track_caller]
    pub fn handle_event(&mut self, event: &InputEvent) {
        for (_, state) in self.stack.iter_mut().rev() {
            if !state.handle_event(event, &mut self.pending) {
                break;
            }
        }
        self.apply_pending_changes();
    }

    /// Draws every state, bottom first.
    pub fn draw(&self, target: &mut dyn RenderTarget) {
        for (_, state) in &self.stack {
            state.draw(target);
        }
    }

    //--- Pending Changes --------------------------------------------------

    /// Applies queued changes in request order.
    ///
    /// # Panics
    ///
    /// Panics on a push of an unregistered id or a pop of an empty stack.
    #[track_caller]
    pub fn apply_pending_changes(&mut self) {
        if let Err(err) = self.try_apply_pending_changes() {
            panic!("{err}");
        }
    }

    /// Fallible twin of [`apply_pending_changes`](Self::apply_pending_changes).
    ///
    /// Stops at the first invalid change; the changes after it are dropped.
    pub fn try_apply_pending_changes(&mut self) -> CoreResult<()> {
        for change in self.pending.take() {
            match change {
                PendingChange::Push(id) => {
                    let state = self.create_state(id)?;
                    debug!("Pushing state {:?} (depth {})", id, self.stack.len() + 1);
                    self.stack.push((id, state));
                }
                PendingChange::Pop => {
                    let (id, _) = self.stack.pop().ok_or(CoreError::EmptyStateStack)?;
                    debug!("Popped state {:?}", id);
                }
                PendingChange::Clear => {
                    debug!("Clearing {} states", self.stack.len());
                    self.stack.clear();
                }
            }
        }
        Ok(())
    }

    //--- Internal Helpers -------------------------------------------------

    fn create_state(&self, id: K) -> CoreResult<Box<dyn State<K> + 'a>> {
        let factory = self
            .factories
            .get(&id)
            .ok_or_else(|| CoreError::UnregisteredState(format!("{:?}", id)))?;
        Ok(factory())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputState, KeyCode};
    use crate::core::player::Player;
    use crate::core::resources::{FontHolder, TextureHolder};
    use crate::core::render::testing::RecordingTarget;
    use crate::core::render::{Color, Drawable, RenderStates, RectangleShape};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Mode {
        A,
        B,
        C,
    }

    impl StateKey for Mode {}

    type Log = Rc<RefCell<Vec<String>>>;

    /// Scripted state: records calls, optionally blocks propagation and
    /// issues a fixed list of requests on its first update.
    struct Scripted {
        name: &'static str,
        log: Log,
        propagate: bool,
        on_update: Vec<PendingChange<Mode>>,
    }

    impl Scripted {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: Rc::clone(log),
                propagate: true,
                on_update: Vec::new(),
            }
        }

        fn blocking(mut self) -> Self {
            self.propagate = false;
            self
        }

        fn requesting(mut self, changes: Vec<PendingChange<Mode>>) -> Self {
            self.on_update = changes;
            self
        }
    }

    impl State<Mode> for Scripted {
        fn draw(&self, target: &mut dyn RenderTarget) {
            self.log.borrow_mut().push(format!("draw {}", self.name));
            let shape = RectangleShape::new(Vec2::ZERO, Vec2::ONE, Color::BLACK);
            target.draw(Drawable::Rectangle(&shape), &RenderStates::DEFAULT);
        }

        fn update(&mut self, _dt: Duration, changes: &mut PendingChanges<Mode>) -> bool {
            self.log.borrow_mut().push(format!("update {}", self.name));
            for change in self.on_update.drain(..) {
                match change {
                    PendingChange::Push(id) => changes.request_push(id),
                    PendingChange::Pop => changes.request_pop(),
                    PendingChange::Clear => changes.request_clear(),
                }
            }
            self.propagate
        }

        fn handle_event(&mut self, _event: &InputEvent, _changes: &mut PendingChanges<Mode>) -> bool {
            self.log.borrow_mut().push(format!("event {}", self.name));
            self.propagate
        }
    }

    struct Fixture {
        textures: TextureHolder,
        fonts: FontHolder,
        player: Player,
        input: InputState,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                textures: TextureHolder::new(),
                fonts: FontHolder::new(),
                player: Player::new(),
                input: InputState::new(),
            }
        }

        fn context(&self) -> Context<'_> {
            Context {
                textures: &self.textures,
                fonts: &self.fonts,
                player: &self.player,
                input: &self.input,
                view_size: Vec2::new(640.0, 480.0),
            }
        }
    }

    fn ids(stack: &StateStack<'_, Mode>) -> Vec<Mode> {
        stack.ids().collect()
    }

    //=====================================================================
    // Deferred Mutation
    //=====================================================================

    #[test]
    fn push_is_deferred_until_after_walk() {
        let fixture = Fixture::new();
        let mut stack = StateStack::new(fixture.context());
        stack.register_state(Mode::A, |_| Scripted::new("a", &Log::default()));

        stack.push_state(Mode::A);
        assert!(stack.is_empty());
        assert!(stack.has_pending_changes());

        stack.update(Duration::ZERO);
        assert_eq!(ids(&stack), vec![Mode::A]);
        assert!(!stack.has_pending_changes());
    }

    #[test]
    fn changes_requested_during_update_apply_after_walk_in_order() {
        let fixture = Fixture::new();
        let log = Log::default();
        let mut stack = StateStack::new(fixture.context());

        let a_log = Rc::clone(&log);
        stack.register_state(Mode::A, move |_| {
            Scripted::new("a", &a_log).requesting(vec![PendingChange::Pop, PendingChange::Push(Mode::B)])
        });
        let b_log = Rc::clone(&log);
        stack.register_state(Mode::B, move |_| Scripted::new("b", &b_log));

        stack.push_state(Mode::A);
        stack.apply_pending_changes();

        stack.update(Duration::ZERO);
        assert_eq!(ids(&stack), vec![Mode::B]);
        assert_eq!(*log.borrow(), vec!["update a"]);

        stack.update(Duration::ZERO);
        assert_eq!(*log.borrow(), vec!["update a", "update b"]);
    }

    #[test]
    fn push_then_pop_in_one_walk_leaves_stack_unchanged() {
        let fixture = Fixture::new();
        let log = Log::default();
        let mut stack = StateStack::new(fixture.context());

        let a_log = Rc::clone(&log);
        stack.register_state(Mode::A, move |_| {
            Scripted::new("a", &a_log).requesting(vec![PendingChange::Push(Mode::B), PendingChange::Pop])
        });
        let b_log = Rc::clone(&log);
        stack.register_state(Mode::B, move |_| Scripted::new("b", &b_log));

        stack.push_state(Mode::A);
        stack.apply_pending_changes();
        stack.update(Duration::ZERO);

        assert_eq!(ids(&stack), vec![Mode::A]);
    }

    #[test]
    fn push_from_upper_state_still_updates_lower_state() {
        let fixture = Fixture::new();
        let log = Log::default();
        let mut stack = StateStack::new(fixture.context());

        let a_log = Rc::clone(&log);
        stack.register_state(Mode::A, move |_| Scripted::new("a", &a_log));
        let b_log = Rc::clone(&log);
        stack.register_state(Mode::B, move |_| {
            Scripted::new("b", &b_log).requesting(vec![PendingChange::Push(Mode::C)])
        });
        let c_log = Rc::clone(&log);
        stack.register_state(Mode::C, move |_| Scripted::new("c", &c_log));

        stack.push_state(Mode::A);
        stack.push_state(Mode::B);
        stack.apply_pending_changes();

        stack.update(Duration::ZERO);
        assert_eq!(*log.borrow(), vec!["update b", "update a"]);
        assert_eq!(ids(&stack), vec![Mode::A, Mode::B, Mode::C]);

        stack.update(Duration::ZERO);
        assert_eq!(
            *log.borrow(),
            vec!["update b", "update a", "update c", "update b", "update a"]
        );
    }

    #[test]
    fn clear_then_push_replaces_everything() {
        let fixture = Fixture::new();
        let log = Log::default();
        let mut stack = StateStack::new(fixture.context());

        let a_log = Rc::clone(&log);
        stack.register_state(Mode::A, move |_| Scripted::new("a", &a_log));
        let c_log = Rc::clone(&log);
        stack.register_state(Mode::C, move |_| {
            Scripted::new("c", &c_log).requesting(vec![PendingChange::Clear, PendingChange::Push(Mode::A)])
        });

        stack.push_state(Mode::A);
        stack.push_state(Mode::C);
        stack.apply_pending_changes();
        assert_eq!(ids(&stack), vec![Mode::A, Mode::C]);

        stack.update(Duration::ZERO);
        assert_eq!(ids(&stack), vec![Mode::A]);
    }

    //=====================================================================
    // Propagation
    //=====================================================================

    #[test]
    fn update_walks_top_down_and_stops_at_blocking_state() {
        let fixture = Fixture::new();
        let log = Log::default();
        let mut stack = StateStack::new(fixture.context());

        for (id, name, blocks) in [(Mode::A, "a", false), (Mode::B, "b", true), (Mode::C, "c", false)] {
            let state_log = Rc::clone(&log);
            stack.register_state(id, move |_| {
                let scripted = Scripted::new(name, &state_log);
                if blocks {
                    scripted.blocking()
                } else {
                    scripted
                }
            });
        }
        stack.push_state(Mode::A);
        stack.push_state(Mode::B);
        stack.push_state(Mode::C);
        stack.apply_pending_changes();

        stack.update(Duration::ZERO);
        stack.handle_event(&InputEvent::key_down(KeyCode::Space));

        assert_eq!(*log.borrow(), vec!["update c", "update b", "event c", "event b"]);
    }

    #[test]
    fn draw_walks_bottom_up_without_stopping() {
        let fixture = Fixture::new();
        let log = Log::default();
        let mut stack = StateStack::new(fixture.context());

        let a_log = Rc::clone(&log);
        stack.register_state(Mode::A, move |_| Scripted::new("a", &a_log).blocking());
        let b_log = Rc::clone(&log);
        stack.register_state(Mode::B, move |_| Scripted::new("b", &b_log).blocking());
        stack.push_state(Mode::A);
        stack.push_state(Mode::B);
        stack.apply_pending_changes();

        let mut target = RecordingTarget::new(640.0, 480.0);
        stack.draw(&mut target);

        assert_eq!(*log.borrow(), vec!["draw a", "draw b"]);
        assert_eq!(target.calls.len(), 2);
    }

    //=====================================================================
    // Registry
    //=====================================================================

    #[test]
    fn each_push_builds_a_fresh_state_with_context() {
        let fixture = Fixture::new();
        let built = Rc::new(RefCell::new(Vec::new()));
        let mut stack = StateStack::new(fixture.context());

        let sink = Rc::clone(&built);
        stack.register_state(Mode::A, move |context| {
            sink.borrow_mut().push(context.view_size);
            Scripted::new("a", &Log::default())
        });

        stack.push_state(Mode::A);
        stack.push_state(Mode::A);
        stack.apply_pending_changes();

        assert_eq!(stack.len(), 2);
        assert_eq!(*built.borrow(), vec![Vec2::new(640.0, 480.0); 2]);
        assert!(stack.is_registered(Mode::A));
        assert!(!stack.is_registered(Mode::B));
    }

    #[test]
    fn unregistered_push_is_an_error() {
        let fixture = Fixture::new();
        let mut stack: StateStack<'_, Mode> = StateStack::new(fixture.context());
        stack.push_state(Mode::B);

        assert_eq!(
            stack.try_apply_pending_changes(),
            Err(CoreError::UnregisteredState("B".into()))
        );
    }

    #[test]
    #[should_panic(expected = "no factory registered for state C")]
    fn unregistered_push_panics() {
        let fixture = Fixture::new();
        let mut stack: StateStack<'_, Mode> = StateStack::new(fixture.context());
        stack.push_state(Mode::C);
        stack.update(Duration::ZERO);
    }

    #[test]
    #[should_panic(expected = "pop requested on an empty state stack")]
    fn pop_on_empty_stack_panics() {
        let fixture = Fixture::new();
        let mut stack: StateStack<'_, Mode> = StateStack::new(fixture.context());
        stack.pop_state();
        stack.apply_pending_changes();
    }

    #[test]
    fn clear_on_empty_stack_is_fine() {
        let fixture = Fixture::new();
        let mut stack: StateStack<'_, Mode> = StateStack::new(fixture.context());
        stack.clear_states();
        stack.apply_pending_changes();
        assert!(stack.is_empty());
        assert_eq!(stack.current(), None);
    }
}
