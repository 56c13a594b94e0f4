//! Error types for the unit-quaternion library
//!
//! All fallible constructors and conversions report failures through a
//! single error kind. Validation happens eagerly at the API boundary, so a
//! returned error guarantees that no state was mutated.

use thiserror::Error;

/// Result type used throughout the unit-quaternion library
pub type RotationResult<T> = Result<T, RotationError>;

/// Error type for rotation construction and conversion.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RotationError {
    /// An argument failed validation: zero rotation axis, malformed Euler
    /// axis sequence, non-orthonormal matrix, or zero-norm components.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
