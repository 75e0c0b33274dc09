//! Error types for the SOM morphing core.

use thiserror::Error;

/// The main error type for som-morph operations.
#[derive(Error, Debug)]
pub enum MorphError {
    /// A training sample contained non-finite coordinates.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration at construction or reset.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Lattice position out of bounds.
    #[error("Lattice position ({row}, {col}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// Error while loading or decoding an image (driver side).
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for som-morph operations.
pub type Result<T> = std::result::Result<T, MorphError>;
