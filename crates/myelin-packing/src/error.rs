//! Error types for myelin-packing.

use thiserror::Error;

/// Result type for packing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while packing disks.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The packing configuration is inconsistent.
    #[error("invalid packing config: {0}")]
    InvalidConfig(String),

    /// The domain description was rejected.
    #[error("topology error: {0}")]
    Topology(#[from] myelin_topology::Error),

    /// Too many disks could not be placed within the attempt and shrink budget.
    #[error("packing infeasible: dropped {dropped} of {total} disks (tolerance {tolerance})")]
    Infeasible {
        dropped: usize,
        total: usize,
        tolerance: f64,
    },
}
