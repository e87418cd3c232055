//=========================================================================
// Core Systems
//
// Engine-agnostic simulation core: everything below the game layer.
//
// Dependency order (leaves first):
// ```text
//   category, error, resources, render
//        ↓
//   scene (SceneGraph, SceneNode, Entity, Aircraft)
//        ↓
//   command (Command, CommandQueue)
//        ↓
//   input, player
//        ↓
//   state (State, StateStack, Context)
// ```
//
// Nothing in here owns a window, a thread or a clock. Time arrives as a
// `Duration` per update and pixels leave through `RenderTarget`.
//
//=========================================================================

pub mod category;
pub mod command;
pub mod error;
pub mod input;
pub mod player;
pub mod render;
pub mod resources;
pub mod scene;
pub mod state;
