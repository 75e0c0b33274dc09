//! Configuration for the SOM morphing engine.

use crate::error::{MorphError, Result};
use serde::{Deserialize, Serialize};

/// Self-Organizing Map engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SomConfig {
    /// Grid width (number of columns).
    /// Default: 10.
    pub width: usize,

    /// Grid height (number of rows).
    /// Default: 10.
    pub height: usize,

    /// Initial learning rate (eta).
    /// Default: 0.1.
    pub initial_learning_rate: f64,

    /// Multiplicative learning rate decay per training step.
    /// Default: 0.999.
    pub learning_rate_decay: f64,

    /// Multiplicative neighborhood radius decay per training step.
    /// Default: 0.999.
    pub radius_decay: f64,

    /// Random seed for weight initialization.
    /// With a seed, weights start uniform-random in [-1, 1]^2; without one,
    /// they start on a regular grid spanning the same domain.
    /// Default: None.
    pub seed: Option<u64>,
}

impl Default for SomConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            initial_learning_rate: 0.1,
            learning_rate_decay: 0.999,
            radius_decay: 0.999,
            seed: None,
        }
    }
}

impl SomConfig {
    /// Returns the total number of neurons in the lattice.
    #[inline]
    pub fn total_neurons(&self) -> usize {
        self.width * self.height
    }

    /// Returns the initial neighborhood radius, `sqrt(width * height)`.
    #[inline]
    pub fn initial_radius(&self) -> f64 {
        (self.total_neurons() as f64).sqrt()
    }

    /// Validates the configuration.
    ///
    /// Dimensions must be positive, and the learning rate and both decay
    /// factors must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MorphError::Config(format!(
                "Grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        validate_rate("initial_learning_rate", self.initial_learning_rate)?;
        validate_rate("learning_rate_decay", self.learning_rate_decay)?;
        validate_rate("radius_decay", self.radius_decay)?;
        Ok(())
    }
}

fn validate_rate(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MorphError::Config(format!(
            "{} must be finite and positive, got {}",
            name, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SomConfig::default();
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 10);
        assert_eq!(config.total_neurons(), 100);
        assert!((config.initial_radius() - 10.0).abs() < 1e-10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_initial_radius_non_square() {
        let config = SomConfig {
            width: 4,
            height: 9,
            ..Default::default()
        };
        assert!((config.initial_radius() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let config = SomConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(MorphError::Config(_))));
    }

    #[test]
    fn test_non_positive_rates_rejected() {
        let config = SomConfig {
            initial_learning_rate: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SomConfig {
            learning_rate_decay: -0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SomConfig {
            radius_decay: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
