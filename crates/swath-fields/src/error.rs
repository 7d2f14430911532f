//! Error types for field decoding.

use thiserror::Error;

/// Errors that can occur while decoding swath fields.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Encoding attributes cannot decode any value.
    #[error("invalid field encoding: {0}")]
    InvalidEncoding(String),

    /// Timestamp string does not match the expected format.
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// Arrays that must describe the same samples differ in length.
    #[error("shape mismatch: {array} has {actual} elements, expected {expected}")]
    ShapeMismatch {
        array: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The decoded swath was rejected by the regridder.
    #[error(transparent)]
    Regrid(#[from] swath_regrid::RegridError),
}

impl FieldError {
    /// Create an InvalidEncoding error.
    pub fn invalid_encoding(msg: impl Into<String>) -> Self {
        Self::InvalidEncoding(msg.into())
    }

    /// Create an InvalidTimestamp error.
    pub fn invalid_timestamp(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for field decoding operations.
pub type FieldResult<T> = std::result::Result<T, FieldError>;
