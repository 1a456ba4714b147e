//! Merging cylinder fragments into a [`Substrate`].
//!
//! The assembler does no geometry of its own. It joins the fragments
//! according to the [`SeamPolicy`], welding modulo the layout's voxel side,
//! and records where each one ended up.

use myelin_mesh::{CylinderMesh, IndexedMesh, SeamPolicy, VertexWelder, Welded};
use myelin_packing::PackedLayout;
use myelin_sampling::RadiusSet;
use tracing::debug;

use crate::{CylinderRecord, Result, Substrate, SubstrateMetadata};

/// Joins fragments and collects run statistics.
#[derive(Debug, Clone, Copy)]
pub struct SubstrateAssembler {
    seam: SeamPolicy,
    welder: VertexWelder,
    voxel_height: f64,
    seed: Option<u64>,
}

impl SubstrateAssembler {
    /// `weld_tolerance` is absolute; it is checked even when fragments stay separate.
    pub fn new(seam: SeamPolicy, weld_tolerance: f64, voxel_height: f64) -> Result<Self> {
        if !voxel_height.is_finite() || voxel_height <= 0.0 {
            return Err(myelin_mesh::Error::InvalidHeight(voxel_height).into());
        }
        Ok(Self {
            seam,
            welder: VertexWelder::new(weld_tolerance)?,
            voxel_height,
            seed: None,
        })
    }

    /// Record the seed the run was generated from.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn seam(&self) -> SeamPolicy {
        self.seam
    }

    /// Assemble `fragments`, which must come from `layout`'s disks.
    pub fn assemble(
        &self,
        radii: &RadiusSet,
        layout: &PackedLayout,
        fragments: &[CylinderMesh],
    ) -> Result<Substrate> {
        let welded = match self.seam {
            SeamPolicy::Separate => Welded {
                mesh: IndexedMesh::concatenate(fragments)?,
                merged_vertices: 0,
                collapsed_triangles: 0,
                duplicate_triangles: 0,
            },
            SeamPolicy::Weld => self.welder.periodic(*layout.domain()).weld(fragments)?,
        };
        let mesh = welded.mesh;
        let placed = RadiusSet::new(layout.disks().iter().map(|d| d.radius).collect())?;

        let cylinders: Vec<CylinderRecord> = fragments
            .iter()
            .zip(&mesh.fragment_triangles)
            .map(|(fragment, triangles)| CylinderRecord {
                disk_index: fragment.source.disk_index,
                center: fragment.disk.center,
                radius: fragment.disk.radius,
                offset: fragment.source.offset,
                wrapped: fragment.is_wrapped(),
                triangles: triangles.clone(),
            })
            .collect();

        let metadata = SubstrateMetadata {
            seed: self.seed,
            requested_count: radii.len(),
            placed_count: layout.disks().len(),
            dropped_count: layout.dropped_count(),
            skipped_count: layout.skipped_count(),
            shrunk_count: layout.shrunk_count(),
            packing_fraction: layout.packing_fraction(),
            sampled_radius_mean: radii.mean(),
            sampled_radius_variance: radii.variance(),
            placed_radius_mean: placed.mean(),
            placed_radius_variance: placed.variance(),
            seam: self.seam,
            merged_vertices: welded.merged_vertices,
            collapsed_triangles: welded.collapsed_triangles,
            duplicate_triangles: welded.duplicate_triangles,
        };

        debug!(
            fragments = cylinders.len(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "Assembled substrate"
        );

        Ok(Substrate {
            mesh,
            voxel_side: layout.domain().side(),
            voxel_height: self.voxel_height,
            disks: layout.disks().to_vec(),
            cylinders,
            metadata,
        })
    }
}
