//! # som-morph - SOM Image-Morphing Core
//!
//! A Self-Organizing Map (SOM) core for morphing between images: a 2D
//! lattice of neurons, each holding a 2D weight vector, trained online via
//! the classical Kohonen update rule with decaying learning rate and
//! decaying neighborhood radius, plus the geometry needed to render the
//! lattice as connected line segments.
//!
//! ## Overview
//!
//! An external driver repeatedly feeds the engine 2D samples (in the
//! reference demo, normalized coordinates of dark pixels drawn from one of
//! two images) and periodically resets the training parameters while
//! swapping the sample source. As `eta` and `sigma` decay, the mesh
//! contracts onto the sampled shape; alternating sources makes it morph
//! between them. The engine itself knows nothing about images, pixels, or
//! drawing surfaces.
//!
//! ## Quick Start
//!
//! ```rust
//! use som_morph::{SomConfig, SomEngine, Vec2, Viewport};
//!
//! let config = SomConfig::default();
//! let mut engine = SomEngine::new(&config)?;
//!
//! // Driver loop: feed normalized samples from [-1, 1]^2.
//! engine.train(Vec2::new(0.25, -0.5))?;
//!
//! // Render the current mesh into a drawing rectangle.
//! let viewport = Viewport::new(0.0, 0.0, 400.0, 400.0);
//! for segment in engine.render_geometry(viewport) {
//!     let _ = (segment.from, segment.to);
//! }
//!
//! // Swap the sample source: restore eta and sigma, reinitialize weights.
//! engine.reset(0.1, 0.999, 0.999)?;
//! # Ok::<(), som_morph::MorphError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - Engine configuration and validation
//! - [`som`] - Lattice, neurons, training engine, and mesh geometry
//! - [`error`] - Error types
//!
//! The `som-morph` binary is a headless driver reproducing the original
//! demo's host-side policy (dark-pixel sampling, periodic reset/swap, frame
//! output); the library has no dependency on it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod som;

// Re-export commonly used types
pub use config::SomConfig;
pub use error::{MorphError, Result};
pub use som::{Lattice, Neuron, Segment, SomEngine, Vec2, Viewport, ETA_FLOOR, SIGMA_FLOOR};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default grid width.
pub const DEFAULT_WIDTH: usize = 10;

/// Default grid height.
pub const DEFAULT_HEIGHT: usize = 10;

/// Default initial learning rate.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Default multiplicative decay factor for `eta` and `sigma`.
pub const DEFAULT_DECAY: f64 = 0.999;
