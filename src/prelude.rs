//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_skies::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Application driver
pub use crate::engine::{Application, ApplicationBuilder, ApplicationResources, TickControl};

// Errors
pub use crate::core::error::{CoreError, CoreResult};

// Scene graph and commands
pub use crate::core::category::Category;
pub use crate::core::command::{Command, CommandQueue};
pub use crate::core::scene::{
    Aircraft, AircraftType, Entity, NodeKey, NodeKind, SceneGraph, SceneNode, SpriteNode, Transform,
};

// Input and player
pub use crate::core::input::{InputEvent, InputState, KeyCode, Modifiers, MouseButton, RealtimeInput};
pub use crate::core::player::{Player, PlayerAction};

// Rendering and resources
pub use crate::core::render::{Color, Drawable, RenderStates, RenderTarget, View};
pub use crate::core::resources::{Font, FontHolder, FontId, Texture, TextureHolder, TextureId};

// States
pub use crate::core::state::{Context, PendingChanges, State, StateKey, StateStack};
pub use crate::game::{StateId, World, WorldConfig};

// Platform
pub use crate::platform::{PlatformBridge, PlatformEvent};
