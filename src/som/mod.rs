//! Self-Organizing Map (SOM) module.
//!
//! Two strictly layered components:
//!
//! - [`Lattice`]: the neuron grid and its weight storage (lattice.rs)
//! - [`SomEngine`]: online Kohonen training and mesh geometry (engine.rs)

mod engine;
mod geometry;
mod lattice;
mod neuron;

pub use engine::{SomEngine, ETA_FLOOR, SIGMA_FLOOR};
pub use geometry::{Segment, Vec2, Viewport};
pub use lattice::Lattice;
pub use neuron::Neuron;
