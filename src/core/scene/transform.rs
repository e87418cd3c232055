//=========================================================================
// Local Transform
//=========================================================================
//
// Position / rotation / scale / origin of a node relative to its parent.
//
// Matrix order (applied right to left to a local point):
//   translate(position) × rotate(rotation) × scale(scale) × translate(-origin)
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Affine2, Vec2};

//=== Transform ===========================================================

/// Local placement of a scene node. Rotation is in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    position: Vec2,
    rotation: f32,
    scale: Vec2,
    origin: Vec2,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
        origin: Vec2::ZERO,
    };

    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    //--- Mutation ---------------------------------------------------------

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Offsets the position.
    pub fn move_by(&mut self, offset: Vec2) {
        self.position += offset;
    }

    /// Sets the rotation, wrapped into `[0, 360)`.
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees.rem_euclid(360.0);
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.set_rotation(self.rotation + degrees);
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    //--- Composition ------------------------------------------------------

    /// Matrix mapping local coordinates into the parent's space.
    pub fn matrix(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(
            self.scale,
            self.rotation.to_radians(),
            self.position,
        ) * Affine2::from_translation(-self.origin)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
