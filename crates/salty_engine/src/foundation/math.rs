//! Math utilities and types
//!
//! Provides the 2D math types used by scenes, entities and surfaces.
//! Affine transforms are homogeneous 3x3 matrices so that surfaces can
//! save, compose and restore them cheaply.

pub use nalgebra::{Matrix3, Point2 as NaPoint2, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = NaPoint2<f32>;

/// Homogeneous 3x3 matrix used as a 2D affine transform
pub type Mat3 = Matrix3<f32>;

/// Width and height of an object
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    /// Horizontal extent
    pub width: f32,

    /// Vertical extent
    pub height: f32,
}

impl Dimensions {
    /// Create new dimensions
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Rotation of an object by some degrees around a centre relative to its position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    /// Rotation centre, relative to the owner's position
    pub centre: Vec2,
    degrees: f32,
}

impl Default for Rotation {
    fn default() -> Self {
        Self {
            centre: Vec2::zeros(),
            degrees: 0.0,
        }
    }
}

impl Rotation {
    /// Create a rotation around `centre` by `degrees`
    pub fn new(centre: Vec2, degrees: f32) -> Self {
        Self { centre, degrees }
    }

    /// Rotation in degrees, normalized into `[0, 360)`
    pub fn degrees(&self) -> f32 {
        normalized_degrees(self.degrees)
    }

    /// Set the rotation in degrees
    pub fn set_degrees(&mut self, degrees: f32) {
        self.degrees = degrees;
    }

    /// Rotation in radians
    pub fn radians(&self) -> f32 {
        self.degrees().to_radians()
    }
}

/// Map any angle in degrees into `[0, 360)`
pub fn normalized_degrees(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0)
}

/// Axis-aligned rectangle, used for hitboxes and primitive drawing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner
    pub position: Vec2,

    /// Size of the rectangle
    pub dimensions: Dimensions,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            dimensions: Dimensions::new(width, height),
        }
    }

    /// Right edge
    pub fn max_x(&self) -> f32 {
        self.position.x + self.dimensions.width
    }

    /// Bottom edge
    pub fn max_y(&self) -> f32 {
        self.position.y + self.dimensions.height
    }

    /// Whether two rectangles overlap with a non-zero area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.position.x < other.max_x()
            && other.position.x < self.max_x()
            && self.position.y < other.max_y()
            && other.position.y < self.max_y()
    }
}

/// Position, size and rotation of a 2D object
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform2D {
    /// Top-left corner in world space
    pub position: Vec2,

    /// Size of the object
    pub dimensions: Dimensions,

    /// Rotation around a centre relative to `position`
    pub rotation: Rotation,
}

impl Transform2D {
    /// Create an unrotated transform
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            dimensions: Dimensions::new(width, height),
            rotation: Rotation::default(),
        }
    }

    /// Builder pattern: rotate around the centre of the object
    pub fn with_centred_rotation(mut self, degrees: f32) -> Self {
        let centre = Vec2::new(self.dimensions.width / 2.0, self.dimensions.height / 2.0);
        self.rotation = Rotation::new(centre, degrees);
        self
    }

    /// X coordinate of the top-left corner
    pub fn x(&self) -> f32 {
        self.position.x
    }

    /// Y coordinate of the top-left corner
    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Width of the object
    pub fn width(&self) -> f32 {
        self.dimensions.width
    }

    /// Height of the object
    pub fn height(&self) -> f32 {
        self.dimensions.height
    }

    /// Move along the x axis
    pub fn move_x(&mut self, delta: f32) {
        self.position.x += delta;
    }

    /// Move along the y axis
    pub fn move_y(&mut self, delta: f32) {
        self.position.y += delta;
    }

    /// Axis-aligned bounds, ignoring rotation
    pub fn rect(&self) -> Rect {
        Rect {
            position: self.position,
            dimensions: self.dimensions,
        }
    }

    /// World-space point the object rotates around
    pub fn rotation_pivot(&self) -> Vec2 {
        self.position + self.rotation.centre
    }
}

/// Affine transform rotating by `radians` around `pivot`
pub fn rotation_about(radians: f32, pivot: Vec2) -> Mat3 {
    Mat3::new_translation(&pivot) * Mat3::new_rotation(radians) * Mat3::new_translation(&-pivot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(10.0, 0.0, 5.0, 5.0);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        // Touching edges do not count as a collision
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_degrees_normalization() {
        assert_relative_eq!(normalized_degrees(370.0), 10.0, epsilon = 1e-4);
        assert_relative_eq!(normalized_degrees(-90.0), 270.0, epsilon = 1e-4);
        assert_relative_eq!(normalized_degrees(360.0), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_rotation_about_keeps_pivot_fixed() {
        let pivot = Vec2::new(3.0, 4.0);
        let matrix = rotation_about(std::f32::consts::FRAC_PI_2, pivot);
        let moved = matrix.transform_point(&Point2::new(3.0, 4.0));
        assert_relative_eq!(moved.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(moved.y, 4.0, epsilon = 1e-5);

        let rotated = matrix.transform_point(&Point2::new(4.0, 4.0));
        assert_relative_eq!(rotated.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(rotated.y, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_centred_rotation_pivot() {
        let transform = Transform2D::new(10.0, 20.0, 4.0, 6.0).with_centred_rotation(45.0);
        assert_eq!(transform.rotation_pivot(), Vec2::new(12.0, 23.0));
        assert_relative_eq!(transform.rotation.degrees(), 45.0);
    }
}
