//! Error types for swath regridding.

use thiserror::Error;

/// Errors that can occur before any regridding work starts.
///
/// Both variants are raised during validation, so a failed call never
/// produces a partial output grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegridError {
    /// The destination grid configuration is invalid.
    #[error("invalid destination grid: {0}")]
    Config(String),

    /// Source arrays do not agree on their dimensions.
    #[error("shape mismatch: {array} has {actual} elements, expected {expected}")]
    ShapeMismatch {
        array: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl RegridError {
    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(array: &'static str, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            array,
            expected,
            actual,
        }
    }
}

/// Result type for regridding operations.
pub type Result<T> = std::result::Result<T, RegridError>;
