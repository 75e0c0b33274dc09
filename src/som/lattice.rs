//! The neuron lattice: a bounds-checked 2D grid of weight vectors.

use crate::error::{MorphError, Result};
use crate::som::{Neuron, Vec2};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A rectangular grid of neurons, row-major.
///
/// The lattice owns the neuron storage and provides indexed access to weight
/// vectors plus the grid-distance query used by neighborhood weighting. It
/// holds no training state; all algorithmic decisions live in
/// [`SomEngine`](crate::som::SomEngine).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lattice {
    width: usize,
    height: usize,
    seed: Option<u64>,
    neurons: Vec<Neuron>,
}

impl Lattice {
    /// Creates a new lattice with weights spread across `[-1, 1]^2`.
    ///
    /// Without a seed the weights form a regular grid (matching the visible
    /// starting mesh before any training); with a seed they are drawn
    /// uniformly at random from a ChaCha8 RNG. Both layouts are a pure
    /// function of the arguments, so [`reinitialize`](Self::reinitialize)
    /// restores them exactly.
    pub fn new(width: usize, height: usize, seed: Option<u64>) -> Self {
        let neurons = initial_neurons(width, height, seed);
        Self {
            width,
            height,
            seed,
            neurons,
        }
    }

    /// Returns the grid dimensions as `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the grid width (number of columns).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the grid height (number of rows).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the total number of neurons.
    #[inline]
    pub fn total_neurons(&self) -> usize {
        self.neurons.len()
    }

    /// Gets a neuron by its 1D row-major index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Neuron> {
        self.neurons.get(index)
    }

    /// Gets a neuron by its 2D position.
    #[inline]
    pub fn get_at(&self, row: usize, col: usize) -> Option<&Neuron> {
        if row < self.height && col < self.width {
            Some(&self.neurons[row * self.width + col])
        } else {
            None
        }
    }

    /// Returns a neuron's current weight vector.
    pub fn weight(&self, row: usize, col: usize) -> Result<Vec2> {
        self.get_at(row, col)
            .map(|n| n.weight)
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    /// Overwrites a neuron's weight vector.
    pub fn set_weight(&mut self, row: usize, col: usize, weight: Vec2) -> Result<()> {
        if row < self.height && col < self.width {
            self.neurons[row * self.width + col].weight = weight;
            Ok(())
        } else {
            Err(self.out_of_bounds(row, col))
        }
    }

    /// Computes the Euclidean grid distance between two positions.
    ///
    /// Distance is in lattice-index space, not weight space.
    pub fn grid_distance(&self, a: (usize, usize), b: (usize, usize)) -> f64 {
        let dr = a.0 as f64 - b.0 as f64;
        let dc = a.1 as f64 - b.1 as f64;
        (dr * dr + dc * dc).sqrt()
    }

    /// Converts a 1D row-major index to `(row, col)` coordinates.
    #[inline]
    pub fn index_to_coords(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    /// Converts `(row, col)` coordinates to a 1D row-major index.
    #[inline]
    pub fn coords_to_index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Iterates over the neurons in row-major order.
    pub fn neurons(&self) -> impl Iterator<Item = &Neuron> {
        self.neurons.iter()
    }

    /// Iterates mutably over the neurons in row-major order.
    pub(crate) fn neurons_mut(&mut self) -> impl Iterator<Item = &mut Neuron> {
        self.neurons.iter_mut()
    }

    /// Restores every weight vector to its initial layout.
    pub fn reinitialize(&mut self) {
        self.neurons = initial_neurons(self.width, self.height, self.seed);
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> MorphError {
        MorphError::OutOfBounds {
            row,
            col,
            width: self.width,
            height: self.height,
        }
    }
}

fn initial_neurons(width: usize, height: usize, seed: Option<u64>) -> Vec<Neuron> {
    match seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..width * height)
                .map(|i| {
                    let weight = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
                    Neuron::new(i / width, i % width, weight)
                })
                .collect()
        }
        None => (0..width * height)
            .map(|i| {
                let row = i / width;
                let col = i % width;
                let weight = Vec2::new(spread(col, width), spread(row, height));
                Neuron::new(row, col, weight)
            })
            .collect(),
    }
}

/// Evenly spaces index `i` of `n` across `[-1, 1]`.
#[inline]
fn spread(i: usize, n: usize) -> f64 {
    if n > 1 {
        -1.0 + 2.0 * i as f64 / (n - 1) as f64
    } else {
        0.0
    }
}
