//! Drawable surface abstraction
//!
//! The scene never talks to a graphics API directly. Everything it draws goes
//! through [`Surface`], which collaborator graphics code implements on top of
//! its own backend. [`CommandSurface`] is a backend-free implementation that
//! records what was drawn, used for headless runs and tests.

use crate::foundation::math::{rotation_about, Dimensions, Mat3, Rect, Vec2};

/// RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
    /// Alpha component
    pub a: f32,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque red
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Fully transparent
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Create an opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with alpha
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Target of every draw call made by a scene
///
/// Implementations keep a current affine transform that applies to all
/// subsequent primitives, like a 2D canvas.
pub trait Surface {
    /// Current transform
    fn transform(&self) -> Mat3;

    /// Replace the current transform
    fn set_transform(&mut self, transform: Mat3);

    /// Size of the visible area in surface units
    fn viewport(&self) -> Dimensions;

    /// Fill an axis-aligned rectangle (in current transform space)
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outline an axis-aligned rectangle (in current transform space)
    fn draw_rect(&mut self, rect: Rect, color: Color);

    /// Draw a line of text with its top-left corner at `position`
    fn draw_text(&mut self, text: &str, position: Vec2, color: Color);

    /// Compose a rotation by `radians` around `pivot` onto the current transform
    fn rotate_about(&mut self, radians: f32, pivot: Vec2) {
        let rotated = self.transform() * rotation_about(radians, pivot);
        self.set_transform(rotated);
    }
}

/// A primitive recorded by [`CommandSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle
    FillRect {
        /// Rectangle in local space
        rect: Rect,
        /// Fill color
        color: Color,
        /// Transform active when the call was made
        transform: Mat3,
    },

    /// Rectangle outline
    DrawRect {
        /// Rectangle in local space
        rect: Rect,
        /// Stroke color
        color: Color,
        /// Transform active when the call was made
        transform: Mat3,
    },

    /// Text line
    Text {
        /// Drawn string
        text: String,
        /// Top-left corner in local space
        position: Vec2,
        /// Text color
        color: Color,
        /// Transform active when the call was made
        transform: Mat3,
    },
}

impl DrawCommand {
    /// Transform the primitive was drawn with
    pub fn transform(&self) -> &Mat3 {
        match self {
            Self::FillRect { transform, .. }
            | Self::DrawRect { transform, .. }
            | Self::Text { transform, .. } => transform,
        }
    }
}

/// Surface that records draw calls instead of rasterizing them
#[derive(Debug, Clone)]
pub struct CommandSurface {
    viewport: Dimensions,
    transform: Mat3,
    commands: Vec<DrawCommand>,
}

impl CommandSurface {
    /// Create an empty surface with the given viewport
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Dimensions::new(width, height),
            transform: Mat3::identity(),
            commands: Vec::new(),
        }
    }

    /// Commands recorded since the last [`clear`](Self::clear)
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands and reset the transform, ready for the next frame
    pub fn clear(&mut self) {
        self.commands.clear();
        self.transform = Mat3::identity();
    }
}

impl Surface for CommandSurface {
    fn transform(&self) -> Mat3 {
        self.transform
    }

    fn set_transform(&mut self, transform: Mat3) {
        self.transform = transform;
    }

    fn viewport(&self) -> Dimensions {
        self.viewport
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            color,
            transform: self.transform,
        });
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::DrawRect {
            rect,
            color,
            transform: self.transform,
        });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            color,
            transform: self.transform,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point2;
    use approx::assert_relative_eq;

    #[test]
    fn test_commands_capture_active_transform() {
        let mut surface = CommandSurface::new(100.0, 100.0);
        let before = surface.transform();

        surface.rotate_about(std::f32::consts::PI, Vec2::new(5.0, 5.0));
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);
        surface.set_transform(before);
        surface.draw_text("score", Vec2::new(1.0, 1.0), Color::WHITE);

        let commands = surface.commands();
        assert_eq!(commands.len(), 2);

        let flipped = commands[0].transform().transform_point(&Point2::new(0.0, 0.0));
        assert_relative_eq!(flipped.x, 10.0, epsilon = 1e-4);
        assert_relative_eq!(flipped.y, 10.0, epsilon = 1e-4);
        assert_eq!(*commands[1].transform(), Mat3::identity());
    }

    #[test]
    fn test_clear_resets_frame() {
        let mut surface = CommandSurface::new(10.0, 10.0);
        surface.rotate_about(1.0, Vec2::zeros());
        surface.draw_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Color::BLACK);

        surface.clear();
        assert!(surface.commands().is_empty());
        assert_eq!(surface.transform(), Mat3::identity());
    }
}
