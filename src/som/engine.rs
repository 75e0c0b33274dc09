//! The SOM training engine: online Kohonen updates and mesh geometry.

use crate::config::SomConfig;
use crate::error::{MorphError, Result};
use crate::som::{Lattice, Segment, Vec2, Viewport};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Smallest learning rate the decay schedule can reach.
///
/// Keeps `eta` strictly positive over arbitrarily long sessions instead of
/// underflowing to zero.
pub const ETA_FLOOR: f64 = 1e-12;

/// Smallest neighborhood radius the decay schedule can reach.
///
/// Keeps `sigma` strictly positive so the Gaussian neighborhood never
/// degenerates into a division by zero.
pub const SIGMA_FLOOR: f64 = 1e-12;

/// A Self-Organizing Map engine for 2D input samples.
///
/// The engine owns a [`Lattice`] plus the mutable training parameters: the
/// learning rate `eta` and the neighborhood radius `sigma`, both decaying
/// multiplicatively once per training step. An external driver feeds it
/// normalized samples from `[-1, 1]^2` via [`train`](Self::train) and reads
/// the mesh back with [`render_geometry`](Self::render_geometry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SomEngine {
    lattice: Lattice,
    config: SomConfig,
    eta: f64,
    sigma: f64,
    step: u64,
}

impl SomEngine {
    /// Creates a new engine from a validated configuration.
    ///
    /// `eta` starts at `config.initial_learning_rate` and `sigma` at
    /// `sqrt(width * height)`.
    pub fn new(config: &SomConfig) -> Result<Self> {
        config.validate()?;

        let lattice = Lattice::new(config.width, config.height, config.seed);
        info!(
            "SOM engine created: {}x{} lattice, eta0={}, sigma0={:.3}",
            config.width,
            config.height,
            config.initial_learning_rate,
            config.initial_radius()
        );

        Ok(Self {
            lattice,
            eta: config.initial_learning_rate,
            sigma: config.initial_radius(),
            step: 0,
            config: config.clone(),
        })
    }

    /// Returns the lattice.
    #[inline]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Returns the configuration the engine currently runs with.
    #[inline]
    pub fn config(&self) -> &SomConfig {
        &self.config
    }

    /// Returns the current learning rate.
    #[inline]
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Returns the current neighborhood radius.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Returns the number of successful training steps since construction
    /// or the last reset.
    #[inline]
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Runs one step of online Kohonen training.
    ///
    /// Finds the Best-Matching Unit for `sample`, moves every neuron toward
    /// the sample weighted by a Gaussian of its grid distance to the BMU,
    /// then decays `eta` and `sigma`.
    ///
    /// Non-finite sample coordinates are rejected with
    /// [`MorphError::InvalidInput`]; the lattice and parameters are left
    /// untouched in that case.
    pub fn train(&mut self, sample: Vec2) -> Result<()> {
        if !sample.is_finite() {
            return Err(MorphError::InvalidInput(format!(
                "non-finite sample ({}, {})",
                sample.x, sample.y
            )));
        }

        let (bmu_row, bmu_col) = self.lattice.index_to_coords(self.find_bmu_index(sample));

        // Full-lattice pass: every neuron moves, however slightly. This is
        // what separates a SOM from plain vector quantization.
        let eta = self.eta;
        let sigma_sq = self.sigma * self.sigma;
        for neuron in self.lattice.neurons_mut() {
            let dr = neuron.row as f64 - bmu_row as f64;
            let dc = neuron.col as f64 - bmu_col as f64;
            let grid_dist_sq = dr * dr + dc * dc;
            let neighborhood = (-grid_dist_sq / (2.0 * sigma_sq)).exp();
            neuron.update_weight(sample, eta, neighborhood);
        }

        self.eta = (self.eta * self.config.learning_rate_decay).max(ETA_FLOOR);
        self.sigma = (self.sigma * self.config.radius_decay).max(SIGMA_FLOOR);
        self.step += 1;

        if self.step % 1000 == 0 {
            debug!(
                "step {}: eta={:.6}, sigma={:.4}",
                self.step, self.eta, self.sigma
            );
        }

        Ok(())
    }

    /// Finds the Best-Matching Unit for a sample.
    ///
    /// Returns the `(row, col)` of the neuron whose weight vector is closest
    /// to the sample in weight space. Ties break toward the first neuron in
    /// row-major scan order, so the query is deterministic. Read-only;
    /// rejects non-finite input like [`train`](Self::train).
    pub fn find_bmu(&self, sample: Vec2) -> Result<(usize, usize)> {
        if !sample.is_finite() {
            return Err(MorphError::InvalidInput(format!(
                "non-finite sample ({}, {})",
                sample.x, sample.y
            )));
        }
        Ok(self.lattice.index_to_coords(self.find_bmu_index(sample)))
    }

    /// Row-major linear scan; strict `<` keeps the first of any tied minima.
    fn find_bmu_index(&self, sample: Vec2) -> usize {
        let mut best_idx = 0;
        let mut best_dist = f64::MAX;

        for (i, neuron) in self.lattice.neurons().enumerate() {
            let dist = neuron.distance_squared(sample);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }
        best_idx
    }

    /// Produces the lattice mesh as line segments in viewport coordinates.
    ///
    /// Each neuron's weight vector is projected from `[-1, 1]^2` into the
    /// viewport rectangle, and a segment is emitted to its right neighbor
    /// and to its neighbor below. Pure query: recomputed fresh from current
    /// weights on every call, never mutates engine state.
    pub fn render_geometry(&self, viewport: Viewport) -> impl Iterator<Item = Segment> + '_ {
        self.lattice.neurons().flat_map(move |neuron| {
            let from = viewport.project(neuron.weight);
            let right = self
                .lattice
                .get_at(neuron.row, neuron.col + 1)
                .map(|n| Segment {
                    from,
                    to: viewport.project(n.weight),
                });
            let below = self
                .lattice
                .get_at(neuron.row + 1, neuron.col)
                .map(|n| Segment {
                    from,
                    to: viewport.project(n.weight),
                });
            right.into_iter().chain(below)
        })
    }

    /// Reinitializes the weights and restores the training parameters.
    ///
    /// The new parameters are validated with the same rules as construction;
    /// on failure the engine is left unchanged. `sigma` is restored to
    /// `sqrt(width * height)` and the step counter to zero.
    pub fn reset(&mut self, eta0: f64, eta_decay: f64, sigma_decay: f64) -> Result<()> {
        let config = SomConfig {
            initial_learning_rate: eta0,
            learning_rate_decay: eta_decay,
            radius_decay: sigma_decay,
            ..self.config.clone()
        };
        config.validate()?;

        self.lattice.reinitialize();
        self.eta = config.initial_learning_rate;
        self.sigma = config.initial_radius();
        self.step = 0;
        self.config = config;

        info!(
            "SOM engine reset: eta0={}, sigma0={:.3}",
            self.eta, self.sigma
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SomConfig {
        SomConfig {
            width: 4,
            height: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = SomEngine::new(&test_config()).unwrap();
        assert_eq!(engine.lattice().dimensions(), (4, 4));
        assert!((engine.eta() - 0.1).abs() < 1e-10);
        assert!((engine.sigma() - 4.0).abs() < 1e-10);
        assert_eq!(engine.step(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SomConfig {
            height: 0,
            ..Default::default()
        };
        assert!(SomEngine::new(&config).is_err());
    }

    #[test]
    fn test_find_bmu_nearest() {
        let engine = SomEngine::new(&test_config()).unwrap();
        // Evenly spaced 4x4 grid: (-1, -1) is exactly neuron (0, 0),
        // (1, 1) exactly neuron (3, 3).
        assert_eq!(engine.find_bmu(Vec2::new(-1.0, -1.0)).unwrap(), (0, 0));
        assert_eq!(engine.find_bmu(Vec2::new(1.0, 1.0)).unwrap(), (3, 3));
    }

    #[test]
    fn test_find_bmu_deterministic() {
        let engine = SomEngine::new(&test_config()).unwrap();
        let sample = Vec2::new(0.3, -0.2);
        let first = engine.find_bmu(sample).unwrap();
        for _ in 0..10 {
            assert_eq!(engine.find_bmu(sample).unwrap(), first);
        }
    }

    #[test]
    fn test_find_bmu_tie_break_row_major() {
        let config = SomConfig {
            width: 2,
            height: 2,
            ..Default::default()
        };
        let engine = SomEngine::new(&config).unwrap();
        // All four corner neurons are equidistant from the origin; the
        // first in row-major order wins.
        assert_eq!(engine.find_bmu(Vec2::new(0.0, 0.0)).unwrap(), (0, 0));
    }

    #[test]
    fn test_find_bmu_rejects_non_finite() {
        let engine = SomEngine::new(&test_config()).unwrap();
        assert!(matches!(
            engine.find_bmu(Vec2::new(f64::INFINITY, 0.0)),
            Err(MorphError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_train_decays_parameters() {
        let mut engine = SomEngine::new(&test_config()).unwrap();
        let eta0 = engine.eta();
        let sigma0 = engine.sigma();

        engine.train(Vec2::new(0.1, 0.1)).unwrap();

        assert!((engine.eta() - eta0 * 0.999).abs() < 1e-12);
        assert!((engine.sigma() - sigma0 * 0.999).abs() < 1e-12);
        assert_eq!(engine.step(), 1);
    }

    #[test]
    fn test_decay_clamped_at_floor() {
        let config = SomConfig {
            width: 2,
            height: 2,
            learning_rate_decay: 1e-8,
            radius_decay: 1e-8,
            ..Default::default()
        };
        let mut engine = SomEngine::new(&config).unwrap();
        for _ in 0..4 {
            engine.train(Vec2::new(0.0, 0.0)).unwrap();
        }
        assert_eq!(engine.eta(), ETA_FLOOR);
        assert_eq!(engine.sigma(), SIGMA_FLOOR);
    }

    #[test]
    fn test_train_rejects_nan_without_side_effects() {
        let mut engine = SomEngine::new(&test_config()).unwrap();
        let before: Vec<Vec2> = engine.lattice().neurons().map(|n| n.weight).collect();
        let eta = engine.eta();
        let sigma = engine.sigma();

        let err = engine.train(Vec2::new(f64::NAN, 0.0));
        assert!(matches!(err, Err(MorphError::InvalidInput(_))));

        let after: Vec<Vec2> = engine.lattice().neurons().map(|n| n.weight).collect();
        assert_eq!(before, after);
        assert_eq!(engine.eta(), eta);
        assert_eq!(engine.sigma(), sigma);
        assert_eq!(engine.step(), 0);
    }

    #[test]
    fn test_render_segment_count() {
        // 2 * W * H - W - H segments for a W x H mesh.
        let engine = SomEngine::new(&test_config()).unwrap();
        let viewport = Viewport::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(engine.render_geometry(viewport).count(), 24);

        let config = SomConfig {
            width: 3,
            height: 5,
            ..Default::default()
        };
        let engine = SomEngine::new(&config).unwrap();
        assert_eq!(engine.render_geometry(viewport).count(), 2 * 15 - 3 - 5);
    }

    #[test]
    fn test_render_restartable() {
        let engine = SomEngine::new(&test_config()).unwrap();
        let viewport = Viewport::new(10.0, 20.0, 300.0, 400.0);

        let first: Vec<Segment> = engine.render_geometry(viewport).collect();
        let second: Vec<Segment> = engine.render_geometry(viewport).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_maps_corners_into_viewport() {
        let engine = SomEngine::new(&test_config()).unwrap();
        let viewport = Viewport::new(100.0, 200.0, 400.0, 400.0);

        // First segment starts at neuron (0, 0), whose weight is (-1, -1).
        let first = engine.render_geometry(viewport).next().unwrap();
        assert!((first.from.x - 100.0).abs() < 1e-10);
        assert!((first.from.y - 200.0).abs() < 1e-10);
    }

    #[test]
    fn test_reset_restores_parameters() {
        let mut engine = SomEngine::new(&test_config()).unwrap();
        for _ in 0..50 {
            engine.train(Vec2::new(0.4, -0.3)).unwrap();
        }

        engine.reset(0.1, 0.999, 0.999).unwrap();
        assert!((engine.eta() - 0.1).abs() < 1e-12);
        assert!((engine.sigma() - 4.0).abs() < 1e-12);
        assert_eq!(engine.step(), 0);
    }

    #[test]
    fn test_reset_rejects_bad_parameters() {
        let mut engine = SomEngine::new(&test_config()).unwrap();
        engine.train(Vec2::new(0.2, 0.2)).unwrap();
        let eta = engine.eta();

        assert!(engine.reset(-1.0, 0.999, 0.999).is_err());
        // Failed reset leaves the engine unchanged.
        assert_eq!(engine.eta(), eta);
        assert_eq!(engine.step(), 1);
    }
}
