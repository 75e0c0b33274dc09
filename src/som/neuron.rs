//! Neuron representation for the Self-Organizing Map.

use crate::som::Vec2;
use serde::{Deserialize, Serialize};

/// A neuron in the Self-Organizing Map.
///
/// Each neuron has a fixed position on the 2D grid and a mutable 2D weight
/// vector in the normalized input domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neuron {
    /// Row position on the grid.
    pub row: usize,
    /// Column position on the grid.
    pub col: usize,
    /// Weight vector.
    pub weight: Vec2,
}

impl Neuron {
    /// Creates a new neuron with the given weight vector.
    pub fn new(row: usize, col: usize, weight: Vec2) -> Self {
        Self { row, col, weight }
    }

    /// Computes the squared Euclidean distance between this neuron's weight
    /// vector and an input sample.
    #[inline]
    pub fn distance_squared(&self, sample: Vec2) -> f64 {
        self.weight.distance_squared(sample)
    }

    /// Computes the Euclidean grid distance to another neuron.
    ///
    /// Distance is in lattice-index space, not weight space.
    pub fn grid_distance(&self, other: &Neuron) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.col as f64 - other.col as f64;
        (dr * dr + dc * dc).sqrt()
    }

    /// Updates the neuron's weight vector towards a sample.
    ///
    /// `learning_rate` is the overall learning rate and `neighborhood` the
    /// neighborhood influence in `[0, 1]`; the weight moves by their product
    /// along each axis, so it never overshoots the sample.
    pub fn update_weight(&mut self, sample: Vec2, learning_rate: f64, neighborhood: f64) {
        let influence = learning_rate * neighborhood;

        self.weight.x += influence * (sample.x - self.weight.x);
        self.weight.y += influence * (sample.y - self.weight.y);
    }
}
