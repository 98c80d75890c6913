use std::ops::Add;

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rectangle {
    /// Creates a new [`Rectangle`].
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the X coordinate of the right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the Y coordinate of the bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

impl Add<Vector> for Rectangle {
    type Output = Self;

    fn add(self, translation: Vector) -> Self {
        Self {
            x: self.x + translation.x,
            y: self.y + translation.y,
            ..self
        }
    }
}

/// A 2D translation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    /// The X component.
    pub x: f32,
    /// The Y component.
    pub y: f32,
}

impl Vector {
    /// The zero [`Vector`].
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new [`Vector`].
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
