//=========================================================================
// World
//=========================================================================
//
// Composition root of the gameplay scene.
//
// Scene layout:
//   root
//     ├─ Background layer ── tiled desert sprite (world bounds)
//     └─ Air layer ───────── Eagle (player)
//                              ├─ Raptor escort (-80, 50)
//                              └─ Raptor escort ( 80, 50)
//
// Per-step protocol (strict order):
//   0. scroll view        1. reset player velocity
//   2. drain commands     3. normalize diagonal + add scroll velocity
//   4. update graph       5. clamp player into view bounds - border
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::SQRT_2;
use std::time::Duration;

use glam::Vec2;
use log::info;

//=== Internal Dependencies ===============================================

use crate::core::command::CommandQueue;
use crate::core::render::{Rect, RenderStates, RenderTarget, View};
use crate::core::resources::{TextureHolder, TextureId};
use crate::core::scene::{
    Aircraft, AircraftType, NodeKey, NodeKind, SceneGraph, SceneNode, SpriteNode,
};

//=== WorldConfig =========================================================

/// Tunable world constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    /// Height of the scrollable world; its width is the view width.
    pub world_height: f32,

    /// Vertical view scroll, units per second. Negative scrolls upwards.
    pub scroll_speed: f32,

    /// Minimum distance kept between the player and the view edges.
    pub border_distance: f32,

    /// Escort positions relative to the leader; the left escort mirrors x.
    pub escort_offset: Vec2,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_height: 2000.0,
            scroll_speed: -50.0,
            border_distance: 40.0,
            escort_offset: Vec2::new(80.0, 50.0),
        }
    }
}

//=== Layer ===============================================================

/// Top-level scene layers, drawn in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Background,
    Air,
}

impl Layer {
    pub const COUNT: usize = 2;
}

//=== World ===============================================================

/// The scrolling gameplay scene and its command queue.
pub struct World {
    view: View,
    graph: SceneGraph,
    layers: [NodeKey; Layer::COUNT],
    player_aircraft: NodeKey,
    command_queue: CommandQueue,
    bounds: Rect,
    spawn_position: Vec2,
    config: WorldConfig,
}

impl World {
    //--- Construction -----------------------------------------------------

    /// Builds the scene for a view of `view_size`.
    ///
    /// # Panics
    ///
    /// Panics if the Eagle, Raptor or Desert texture is missing.
    #[track_caller]
    pub fn new(view_size: Vec2, textures: &TextureHolder, config: WorldConfig) -> Self {
        let bounds = Rect::new(0.0, 0.0, view_size.x, config.world_height);
        let spawn_position = Vec2::new(view_size.x / 2.0, bounds.height - view_size.y / 2.0);

        let mut graph = SceneGraph::new();
        let root = graph.root();
        let layers = [
            graph.insert_child(root, SceneNode::container()),
            graph.insert_child(root, SceneNode::container()),
        ];

        graph.insert_child(
            layers[Layer::Background as usize],
            SceneNode::new(NodeKind::Sprite(SpriteNode::tiled(
                textures.get(TextureId::Desert),
                bounds,
            )))
            .at(bounds.position()),
        );

        let player_aircraft = graph.insert_child(
            layers[Layer::Air as usize],
            Self::aircraft(AircraftType::Eagle, textures).at(spawn_position),
        );

        let offset = config.escort_offset;
        for escort_position in [Vec2::new(-offset.x, offset.y), offset] {
            graph.insert_child(
                player_aircraft,
                Self::aircraft(AircraftType::Raptor, textures).at(escort_position),
            );
        }

        info!(
            "World built: {} nodes, bounds {:?}, spawn {:?}",
            graph.len(),
            bounds,
            spawn_position
        );

        Self {
            view: View::new(spawn_position, view_size),
            graph,
            layers,
            player_aircraft,
            command_queue: CommandQueue::new(),
            bounds,
            spawn_position,
            config,
        }
    }

    fn aircraft(kind: AircraftType, textures: &TextureHolder) -> SceneNode {
        SceneNode::new(NodeKind::Aircraft(Aircraft::new(kind, textures)))
    }

    //--- Per-step ---------------------------------------------------------

    /// Advances the world by one step of `dt`.
    pub fn update(&mut self, dt: Duration) {
        let seconds = dt.as_secs_f32();
        self.view.move_by(Vec2::new(0.0, self.config.scroll_speed * seconds));
        self.set_player_velocity(Vec2::ZERO);

        while let Ok(command) = self.command_queue.try_pop() {
            self.graph.dispatch(&command, dt);
        }

        self.adapt_player_velocity();
        self.graph.update(dt);
        self.adapt_player_position();
    }

    /// Draws the scene through the world view.
    pub fn draw(&self, target: &mut dyn RenderTarget) {
        target.set_view(&self.view);
        self.graph.draw(target, &RenderStates::DEFAULT);
    }

    //--- Accessors --------------------------------------------------------

    pub fn command_queue_mut(&mut self) -> &mut CommandQueue {
        &mut self.command_queue
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn layer(&self, layer: Layer) -> NodeKey {
        self.layers[layer as usize]
    }

    pub fn player_aircraft(&self) -> NodeKey {
        self.player_aircraft
    }

    pub fn player_position(&self) -> Vec2 {
        self.graph[self.player_aircraft].transform().position()
    }

    pub fn player_velocity(&self) -> Vec2 {
        match self.graph[self.player_aircraft].kind() {
            NodeKind::Aircraft(aircraft) => aircraft.velocity(),
            _ => Vec2::ZERO,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn spawn_position(&self) -> Vec2 {
        self.spawn_position
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    //--- Internal Helpers -------------------------------------------------

    fn player_mut(&mut self) -> Option<&mut Aircraft> {
        self.graph
            .get_mut(self.player_aircraft)
            .and_then(|node| node.variant_mut::<Aircraft>())
    }

    fn set_player_velocity(&mut self, velocity: Vec2) {
        if let Some(aircraft) = self.player_mut() {
            aircraft.set_velocity(velocity);
        }
    }

    fn adapt_player_velocity(&mut self) {
        let scroll = self.config.scroll_speed;
        if let Some(aircraft) = self.player_mut() {
            let mut velocity = aircraft.velocity();
            if velocity.x != 0.0 && velocity.y != 0.0 {
                velocity /= SQRT_2;
            }
            aircraft.set_velocity(velocity + Vec2::new(0.0, scroll));
        }
    }

    fn adapt_player_position(&mut self) {
        let allowed = self.view.bounds().inset(self.config.border_distance);
        let transform = self.graph[self.player_aircraft].transform_mut();

        let mut position = transform.position();
        position.x = position.x.max(allowed.left).min(allowed.right());
        position.y = position.y.max(allowed.top).min(allowed.bottom());
        transform.set_position(position);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::category::Category;
    use crate::core::command::Command;
    use crate::core::player::PlayerAction;
    use crate::core::render::testing::{DrawCall, RecordingTarget};
    use crate::core::resources::Texture;
    use approx::assert_relative_eq;

    const VIEW: Vec2 = Vec2::new(640.0, 480.0);
    const STEP: Duration = Duration::from_nanos(16_666_667);

    fn textures() -> TextureHolder {
        let mut textures = TextureHolder::new();
        textures.insert(TextureId::Eagle, Texture::new("Eagle.png", 48, 64));
        textures.insert(TextureId::Raptor, Texture::new("Raptor.png", 60, 50));
        textures.insert(TextureId::Desert, Texture::new("Desert.png", 512, 512));
        textures
    }

    fn world() -> World {
        World::new(VIEW, &textures(), WorldConfig::default())
    }

    fn push_move(world: &mut World, action: PlayerAction) {
        let velocity = action.direction() * 200.0;
        world.command_queue_mut().push(Command::for_node::<Aircraft, _>(
            Category::PLAYER_AIRCRAFT,
            move |aircraft, _| aircraft.accelerate(velocity),
        ));
    }

    //=====================================================================
    // Construction
    //=====================================================================

    #[test]
    fn scene_is_built_with_layers_player_and_escorts() {
        let world = world();
        let graph = world.graph();

        assert_eq!(graph.children(graph.root()), &[world.layer(Layer::Background), world.layer(Layer::Air)]);
        assert_eq!(graph.children(world.layer(Layer::Background)).len(), 1);
        assert_eq!(graph.children(world.layer(Layer::Air)), &[world.player_aircraft()]);

        let escorts = graph.children(world.player_aircraft());
        assert_eq!(escorts.len(), 2);
        assert_eq!(graph[escorts[0]].transform().position(), Vec2::new(-80.0, 50.0));
        assert_eq!(graph[escorts[1]].transform().position(), Vec2::new(80.0, 50.0));
        assert_eq!(graph[escorts[0]].category(), Category::ENEMY_AIRCRAFT);
        assert_eq!(graph[world.player_aircraft()].category(), Category::PLAYER_AIRCRAFT);
    }

    #[test]
    fn view_starts_centered_on_spawn() {
        let world = world();
        assert_eq!(world.spawn_position(), Vec2::new(320.0, 1760.0));
        assert_eq!(world.view().center(), world.spawn_position());
        assert_eq!(world.player_position(), world.spawn_position());
        assert_eq!(world.bounds(), Rect::new(0.0, 0.0, 640.0, 2000.0));
    }

    #[test]
    #[should_panic(expected = "resource Desert was never loaded")]
    fn missing_background_texture_panics() {
        let mut textures = TextureHolder::new();
        textures.insert(TextureId::Eagle, Texture::new("Eagle.png", 48, 64));
        textures.insert(TextureId::Raptor, Texture::new("Raptor.png", 60, 50));
        World::new(VIEW, &textures, WorldConfig::default());
    }

    //=====================================================================
    // Update Protocol
    //=====================================================================

    #[test]
    fn idle_step_scrolls_view_and_player_together() {
        let mut world = world();
        world.update(Duration::from_secs(1));

        assert_relative_eq!(world.view().center().y, 1710.0, epsilon = 1e-3);
        assert_eq!(world.player_velocity(), Vec2::new(0.0, -50.0));
        assert_relative_eq!(world.player_position().y, 1710.0, epsilon = 1e-3);
    }

    #[test]
    fn diagonal_input_keeps_speed_at_200() {
        let mut world = world();
        push_move(&mut world, PlayerAction::MoveLeft);
        push_move(&mut world, PlayerAction::MoveUp);
        world.update(STEP);

        let pre_scroll = world.player_velocity() - Vec2::new(0.0, -50.0);
        assert_relative_eq!(pre_scroll.length(), 200.0, epsilon = 1e-3);
        assert_relative_eq!(pre_scroll.x, -200.0 / SQRT_2, epsilon = 1e-3);
        assert!(world.command_queue_mut().is_empty());
    }

    #[test]
    fn single_axis_input_is_not_normalized() {
        let mut world = world();
        push_move(&mut world, PlayerAction::MoveRight);
        world.update(STEP);
        assert_eq!(world.player_velocity(), Vec2::new(200.0, -50.0));
    }

    #[test]
    fn velocity_is_reset_every_step() {
        let mut world = world();
        push_move(&mut world, PlayerAction::MoveRight);
        world.update(STEP);
        world.update(STEP);
        assert_eq!(world.player_velocity(), Vec2::new(0.0, -50.0));
    }

    #[test]
    fn player_is_clamped_inside_view_border() {
        let mut world = world();
        for _ in 0..120 {
            push_move(&mut world, PlayerAction::MoveRight);
            world.update(STEP);
        }

        let view_right = world.view().bounds().right();
        assert_relative_eq!(world.player_position().x, view_right - 40.0, epsilon = 1e-3);
    }

    #[test]
    fn player_is_clamped_at_bottom_border() {
        let mut world = world();
        for _ in 0..120 {
            push_move(&mut world, PlayerAction::MoveDown);
            world.update(STEP);
        }

        let view_bottom = world.view().bounds().bottom();
        assert_relative_eq!(world.player_position().y, view_bottom - 40.0, epsilon = 1e-3);
    }

    #[test]
    fn escorts_follow_the_leader() {
        let mut world = world();
        let escorts = world.graph().children(world.player_aircraft()).to_vec();
        let before: Vec<Vec2> = escorts.iter().map(|&e| world.graph().world_position(e)).collect();

        let leader = world.player_aircraft();
        world.graph_mut()[leader].transform_mut().move_by(Vec2::new(10.0, 0.0));

        for (escort, old) in escorts.iter().zip(before) {
            assert_eq!(world.graph().world_position(*escort), old + Vec2::new(10.0, 0.0));
        }
    }

    #[test]
    fn enemy_commands_do_not_reach_the_player() {
        let mut world = world();
        world.command_queue_mut().push(Command::for_node::<Aircraft, _>(
            Category::ENEMY_AIRCRAFT,
            |aircraft, _| aircraft.accelerate(Vec2::new(0.0, 500.0)),
        ));
        world.update(STEP);

        assert_eq!(world.player_velocity(), Vec2::new(0.0, -50.0));
        let escort = world.graph().children(world.player_aircraft())[0];
        match world.graph()[escort].kind() {
            NodeKind::Aircraft(aircraft) => assert_eq!(aircraft.velocity(), Vec2::new(0.0, 500.0)),
            _ => panic!("escort is an aircraft"),
        }
    }

    //=====================================================================
    // Drawing
    //=====================================================================

    #[test]
    fn draw_sets_world_view_then_background_then_aircraft() {
        let world = world();
        let mut target = RecordingTarget::new(VIEW.x, VIEW.y);
        world.draw(&mut target);

        assert_eq!(target.views, vec![*world.view()]);
        let textures: Vec<&str> = target
            .calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Sprite { texture, .. } => Some(texture.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(textures, vec!["Desert.png", "Eagle.png", "Raptor.png", "Raptor.png"]);
    }
}
