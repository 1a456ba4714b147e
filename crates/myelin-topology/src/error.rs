//! Error types for myelin-topology.

use thiserror::Error;

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when describing the periodic domain.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The domain side length is not a finite positive number.
    #[error("invalid domain side length: {0}")]
    InvalidSide(f64),
}
