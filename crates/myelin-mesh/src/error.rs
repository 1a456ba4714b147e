//! Error types for myelin-mesh.

use thiserror::Error;

/// Result type for mesh construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Degenerate geometry handed to the mesh stage.
///
/// These indicate a programming error upstream and are not recoverable.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Fewer than three segments cannot enclose a tube.
    #[error("segment count must be at least {min}, got {got}")]
    InvalidSegments { got: u32, min: u32 },

    /// Tube height is not a finite positive number.
    #[error("invalid cylinder height: {0}")]
    InvalidHeight(f64),

    /// Disk radius is not a finite positive number.
    #[error("degenerate radius {radius} for disk {disk_index}")]
    DegenerateRadius { disk_index: usize, radius: f64 },

    /// Weld tolerance is not a finite positive number.
    #[error("invalid weld tolerance: {0}")]
    InvalidTolerance(f64),

    /// The merged mesh does not fit 32-bit indices.
    #[error("mesh has {0} vertices, more than 32-bit indices can address")]
    TooManyVertices(usize),
}
