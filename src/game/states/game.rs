//=========================================================================
// Game State
//=========================================================================
//
// Hosts the World and feeds it player input.
//
//   update(dt)      : World::update, then realtime input → commands
//   handle_event(e) : Player::handle_event; Escape pushes Pause
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, RealtimeInput};
use crate::core::player::Player;
use crate::core::render::RenderTarget;
use crate::core::state::{Context, PendingChanges, State};
use crate::game::world::{World, WorldConfig};
use crate::game::StateId;

//=== GameState ===========================================================

pub struct GameState<'a> {
    world: World,
    player: &'a Player,
    input: &'a dyn RealtimeInput,
}

impl<'a> GameState<'a> {
    pub fn new(context: Context<'a>) -> Self {
        Self {
            world: World::new(context.view_size, context.textures, WorldConfig::default()),
            player: context.player,
            input: context.input,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }
}

impl State<StateId> for GameState<'_> {
    fn draw(&self, target: &mut dyn RenderTarget) {
        self.world.draw(target);
    }

    fn update(&mut self, dt: Duration, _changes: &mut PendingChanges<StateId>) -> bool {
        self.world.update(dt);
        self.player
            .handle_realtime_input(self.input, self.world.command_queue_mut());
        true
    }

    fn handle_event(&mut self, event: &InputEvent, changes: &mut PendingChanges<StateId>) -> bool {
        self.player.handle_event(event, self.world.command_queue_mut());

        if event.pressed_key() == Some(KeyCode::Escape) {
            changes.request_push(StateId::Pause);
        }
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
