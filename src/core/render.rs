//=========================================================================
// Render Boundary
//=========================================================================
//
// Draw-call vocabulary shared by the scene graph and the states.
//
// The core never rasterizes anything. Nodes and states describe what to
// draw (`Drawable`) and where (`RenderStates`), and hand both to a
// host-provided `RenderTarget`.
//
// Transform flow:
// ```text
//   RenderStates(parent) × node.local ──> RenderStates(node)
//                                              │
//                              target.draw(payload, &states)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Affine2, Vec2};

//=== Internal Dependencies ===============================================

use super::resources::{Font, Texture};

//=== Color ===============================================================

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const RED: Self = Self::rgba(255, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

//=== Rect ================================================================

/// Axis-aligned rectangle, top-left origin, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Shrinks the rectangle by `margin` on every side.
    pub fn inset(&self, margin: f32) -> Self {
        Self::new(
            self.left + margin,
            self.top + margin,
            self.width - 2.0 * margin,
            self.height - 2.0 * margin,
        )
    }
}

//=== View ================================================================

/// 2D camera: the world-space rectangle mapped onto the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    center: Vec2,
    size: Vec2,
}

impl View {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// View showing `size` with its top-left corner at the origin.
    pub fn from_size(size: Vec2) -> Self {
        Self::new(size / 2.0, size)
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    pub fn move_by(&mut self, offset: Vec2) {
        self.center += offset;
    }

    /// World-space area currently visible.
    pub fn bounds(&self) -> Rect {
        Rect::from_position_size(self.center - self.size / 2.0, self.size)
    }
}

//=== RenderStates ========================================================

/// Accumulated draw state handed down the scene graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStates {
    pub transform: Affine2,
}

impl RenderStates {
    pub const DEFAULT: Self = Self {
        transform: Affine2::IDENTITY,
    };

    /// Composes these states with a child's local transform.
    pub fn combined(&self, local: Affine2) -> Self {
        Self {
            transform: self.transform * local,
        }
    }
}

impl Default for RenderStates {
    fn default() -> Self {
        Self::DEFAULT
    }
}

//=== Drawables ===========================================================

/// Textured quad. Position comes from the owning node or the caller's
/// states; the sprite only carries its own origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    texture: Texture,
    texture_rect: Rect,
    origin: Vec2,
    repeated: bool,
}

impl Sprite {
    /// Sprite covering the whole texture.
    pub fn new(texture: &Texture) -> Self {
        let size = texture.size().as_vec2();
        Self::with_rect(texture, Rect::new(0.0, 0.0, size.x, size.y))
    }

    /// Sprite showing `texture_rect` of the texture.
    pub fn with_rect(texture: &Texture, texture_rect: Rect) -> Self {
        Self {
            texture: texture.clone(),
            texture_rect,
            origin: Vec2::ZERO,
            repeated: false,
        }
    }

    /// Sprite covering `area`, repeating the texture to fill it.
    pub fn tiled(texture: &Texture, area: Rect) -> Self {
        Self {
            repeated: true,
            ..Self::with_rect(texture, area)
        }
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn texture_rect(&self) -> Rect {
        self.texture_rect
    }

    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Bounds in the sprite's own space, before origin and transform.
    pub fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.texture_rect.width, self.texture_rect.height)
    }

    /// Moves the origin to the middle of the local bounds.
    pub fn center_origin(&mut self) {
        let bounds = self.local_bounds();
        self.origin = Vec2::new(
            (bounds.left + bounds.width / 2.0).floor(),
            (bounds.top + bounds.height / 2.0).floor(),
        );
    }
}

/// A line of text. Glyph metrics live in the host, so centring is
/// requested with a flag rather than computed here.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub string: String,
    pub font: Font,
    pub character_size: u32,
    pub color: Color,
    pub position: Vec2,
    pub centered: bool,
}

impl Text {
    pub const DEFAULT_CHARACTER_SIZE: u32 = 30;

    pub fn new(string: impl Into<String>, font: &Font) -> Self {
        Self {
            string: string.into(),
            font: font.clone(),
            character_size: Self::DEFAULT_CHARACTER_SIZE,
            color: Color::WHITE,
            position: Vec2::ZERO,
            centered: false,
        }
    }

    /// Anchors the text at the middle of its bounds.
    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_size(mut self, character_size: u32) -> Self {
        self.character_size = character_size;
        self
    }
}

/// Solid rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleShape {
    pub position: Vec2,
    pub size: Vec2,
    pub fill: Color,
}

impl RectangleShape {
    pub fn new(position: Vec2, size: Vec2, fill: Color) -> Self {
        Self { position, size, fill }
    }
}

/// Anything the core can ask a target to draw.
#[derive(Debug, Clone, Copy)]
pub enum Drawable<'a> {
    Sprite(&'a Sprite),
    Text(&'a Text),
    Rectangle(&'a RectangleShape),
}

//=== RenderTarget ========================================================

/// Host-provided drawing surface.
pub trait RenderTarget {
    /// Draws `drawable` with `states.transform` applied.
    fn draw(&mut self, drawable: Drawable<'_>, states: &RenderStates);

    /// Sets the camera used by subsequent draws.
    fn set_view(&mut self, view: &View);

    /// Camera covering the whole surface in pixel coordinates.
    fn default_view(&self) -> View;
}

//=========================================================================
// Test Support
//=========================================================================


//=========================================================================
// Unit Tests
//=========================================================================
