//! Substrate Mesh Construction
//!
//! Turns packed disks into the triangulated geometry a random-walk simulator
//! collides particles against.
//!
//! - [`CylinderMeshBuilder`] extrudes one disk into an open tube spanning the
//!   voxel height, `2n` vertices and `2n` outward-facing triangles.
//! - [`PeriodicBoundaryStitcher`] adds translated copies of tubes that cross
//!   a voxel face so the substrate tiles seamlessly.
//! - [`VertexWelder`] merges the fragments into one [`IndexedMesh`],
//!   collapsing numerically coincident vertices. Made periodic, it compares
//!   positions modulo the voxel side, so each wrapped copy folds onto its
//!   original. [`IndexedMesh::concatenate`] keeps fragments separate instead.

mod cylinder;
mod error;
mod stitch;
mod weld;

pub use cylinder::{CylinderMesh, CylinderMeshBuilder, FragmentSource, DEFAULT_SEGMENTS, MIN_SEGMENTS};
pub use error::{Error, Result};
pub use stitch::PeriodicBoundaryStitcher;
pub use weld::{IndexedMesh, SeamPolicy, VertexWelder, Welded};
