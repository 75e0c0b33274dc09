//! Geometry primitives for the lattice and its rendered mesh.

use serde::{Deserialize, Serialize};

/// A 2D point, used both for neuron weight vectors and input samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Vec2 {
    /// Creates a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Computes the squared Euclidean distance to another point.
    #[inline]
    pub fn distance_squared(&self, other: Vec2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A target drawing rectangle for [`render_geometry`].
///
/// [`render_geometry`]: crate::som::SomEngine::render_geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Viewport {
    /// Creates a new viewport rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Maps a point from the normalized weight domain `[-1, 1]^2` into
    /// viewport coordinates.
    ///
    /// `(-1, -1)` maps to the top-left corner and `(1, 1)` to the
    /// bottom-right.
    #[inline]
    pub fn project(&self, point: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + (point.x + 1.0) * 0.5 * self.width,
            y: self.y + (point.y + 1.0) * 0.5 * self.height,
        }
    }
}

/// A line segment of the rendered lattice mesh, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub from: Vec2,
    /// End point.
    pub to: Vec2,
}
