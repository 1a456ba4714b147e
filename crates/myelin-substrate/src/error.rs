//! Error types for myelin-substrate.

use thiserror::Error;

/// Result type for substrate generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the generation pipeline, tagged by stage.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration text could not be parsed.
    #[error("configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Radius sampling failed.
    #[error("sampling failed: {0}")]
    Sampling(#[from] myelin_sampling::Error),

    /// Disk packing failed.
    #[error("packing failed: {0}")]
    Packing(#[from] myelin_packing::Error),

    /// Mesh construction failed.
    #[error("mesh construction failed: {0}")]
    Mesh(#[from] myelin_mesh::Error),

    /// Domain description rejected.
    #[error("topology error: {0}")]
    Topology(#[from] myelin_topology::Error),
}
