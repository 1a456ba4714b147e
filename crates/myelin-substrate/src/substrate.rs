//! The generated substrate and its provenance.

use std::ops::Range;

use myelin_mesh::{IndexedMesh, SeamPolicy};
use myelin_topology::{Disk, ImageOffset, Point2};

/// One cylinder fragment in the final mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderRecord {
    /// Index of the packed disk this fragment belongs to
    pub disk_index: usize,
    /// Cross-section center, after translation for wrapped copies
    pub center: Point2,
    pub radius: f64,
    /// Tile the fragment sits in relative to the voxel
    pub offset: ImageOffset,
    /// `true` for periodic copies
    pub wrapped: bool,
    /// Triangles of this fragment in [`Substrate::mesh`]
    pub triangles: Range<usize>,
}

/// Statistics describing how a substrate was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SubstrateMetadata {
    /// Seed of the generator, when the run was seeded from config
    pub seed: Option<u64>,
    /// Radii drawn from the distribution
    pub requested_count: usize,
    /// Disks present in the layout
    pub placed_count: usize,
    pub dropped_count: usize,
    pub skipped_count: usize,
    pub shrunk_count: usize,
    /// Achieved area fraction, never above the configured target
    pub packing_fraction: f64,
    /// Empirical mean of every sampled radius, placed or not
    pub sampled_radius_mean: f64,
    /// Empirical population variance of every sampled radius
    pub sampled_radius_variance: f64,
    /// Mean radius of the disks in the layout, after any shrinking
    pub placed_radius_mean: f64,
    /// Population variance of the radii in the layout
    pub placed_radius_variance: f64,
    pub seam: SeamPolicy,
    /// Vertices merged into an earlier one by welding
    pub merged_vertices: usize,
    /// Triangles removed because welding collapsed them
    pub collapsed_triangles: usize,
    /// Wrapped-copy faces folded onto their originals by welding
    pub duplicate_triangles: usize,
}

/// A periodic white matter substrate ready for simulation.
///
/// Every cylinder spans `z ∈ [0, voxel_height]`; cylinders crossing the
/// voxel boundary are accompanied by their wrapped copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Substrate {
    pub(crate) mesh: IndexedMesh,
    pub(crate) voxel_side: f64,
    pub(crate) voxel_height: f64,
    pub(crate) disks: Vec<Disk>,
    pub(crate) cylinders: Vec<CylinderRecord>,
    pub(crate) metadata: SubstrateMetadata,
}

impl Substrate {
    pub fn mesh(&self) -> &IndexedMesh {
        &self.mesh
    }

    pub fn voxel_side(&self) -> f64 {
        self.voxel_side
    }

    pub fn voxel_height(&self) -> f64 {
        self.voxel_height
    }

    /// Packed cross-sections, inside the voxel.
    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    /// Mesh fragments in output order: each disk's original, then its copies.
    /// Under [`SeamPolicy::Weld`] the copies fold onto their originals and
    /// their triangle ranges are empty.
    pub fn cylinders(&self) -> &[CylinderRecord] {
        &self.cylinders
    }

    pub fn metadata(&self) -> &SubstrateMetadata {
        &self.metadata
    }

    /// Vertex coordinates as `[x0, y0, z0, x1, ...]`.
    pub fn flat_vertices(&self) -> Vec<f64> {
        self.mesh.flat_vertices()
    }

    /// Triangle indices as `[a0, b0, c0, a1, ...]`.
    pub fn flat_triangles(&self) -> Vec<u32> {
        self.mesh.flat_triangles()
    }

    /// Distinct fibers, not counting wrapped copies.
    pub fn cylinder_count(&self) -> usize {
        self.disks.len()
    }

    /// Periodic copies added at the voxel boundary.
    pub fn wrapped_count(&self) -> usize {
        self.cylinders.iter().filter(|c| c.wrapped).count()
    }
}
