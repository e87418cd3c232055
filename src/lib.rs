//=========================================================================
// Aetheric Skies — Library Root
//
// Scene graph, command dispatch and state stack core for a vertically
// scrolling 2D air-combat game.
//
// Layout:
// - `core`     : scene graph, commands, input, player, state stack
// - `game`     : the World and the Title / Menu / Loading / Game / Pause
//                modes
// - `platform` : winit → InputEvent translation and frame batching
// - `Application` : fixed-timestep driver fed through a channel
//
// Typical usage:
// ```no_run
// let resources = load_resources();
// let mut app = ApplicationBuilder::new().build(&resources);
// let mut bridge = PlatformBridge::new(app.event_sender());
// // winit loop: bridge.handle_window_event(&event);
// //             app.advance(frame_time); app.render(&mut target);
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------

pub mod core;
pub mod game;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------

mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Application, ApplicationBuilder, ApplicationResources, TickControl};
