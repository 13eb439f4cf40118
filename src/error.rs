//! Error types for deltagrid.

use thiserror::Error;

/// The main error type for deltagrid operations.
#[derive(Error, Debug)]
pub enum DeltaGridError {
    /// Error during SOM training or inference.
    #[error("SOM error: {0}")]
    Som(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A frame could not be rendered.
    #[error("Render error: {0}")]
    Render(String),

    /// Empty input.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Vector length does not match the grid's feature dimension.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The feature dimension of the grid.
        expected: usize,
        /// The length of the offending vector.
        actual: usize,
    },

    /// Malformed input data.
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image encoding error.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type alias for deltagrid operations.
pub type Result<T> = std::result::Result<T, DeltaGridError>;
