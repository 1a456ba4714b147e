//! Error types for myelin-sampling.

use thiserror::Error;

/// Result type for sampling operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while drawing a radius population.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The distribution parameters are invalid or leave no positive support.
    #[error("invalid distribution: {0}")]
    InvalidDistribution(String),

    /// A radius is not a finite positive number.
    #[error("invalid radius: {0}")]
    InvalidRadius(f64),

    /// A value kept falling outside the accepted range.
    #[error("rejection budget of {budget} draws exhausted after accepting {accepted} of {requested} radii")]
    RejectionBudgetExhausted {
        accepted: usize,
        requested: usize,
        budget: u32,
    },
}
