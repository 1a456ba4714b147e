//! White Matter Substrate Generation
//!
//! Ties the pipeline together: radii are sampled from a distribution,
//! packed into a periodic square voxel, extruded into cylinder meshes,
//! stitched across the voxel boundary and assembled into one indexed mesh.
//!
//! A single seeded generator is threaded through every stage, so a
//! [`SubstrateConfig`] fully determines its [`Substrate`].
//!
//! ```
//! use myelin_substrate::{generate, SubstrateConfig};
//!
//! let config = SubstrateConfig { count: 10, segments: 8, ..SubstrateConfig::default() };
//! let substrate = generate(&config).unwrap();
//! assert!(substrate.metadata().packing_fraction <= config.target_fraction + 1e-12);
//! assert_eq!(substrate.flat_vertices().len(), 3 * substrate.mesh().vertex_count());
//! ```

mod assembler;
mod config;
mod ensemble;
mod error;
mod pipeline;
mod substrate;

pub use assembler::SubstrateAssembler;
pub use config::{SubstrateConfig, DEFAULT_WELD_RELATIVE_TOLERANCE};
pub use ensemble::generate_ensemble;
pub use error::{Error, Result};
pub use pipeline::{generate, generate_with_rng};
pub use substrate::{CylinderRecord, Substrate, SubstrateMetadata};

pub use myelin_mesh::{IndexedMesh, SeamPolicy};
pub use myelin_sampling::{DistributionKind, DistributionSpec};
pub use myelin_topology::{Disk, ImageOffset, Point2};
