//! Periodic copies of cylinders that cross the voxel boundary.
//!
//! A cylinder poking through an edge of the voxel reappears on the opposite
//! side when the voxel is tiled. The stitcher emits those translated copies so
//! the substrate geometry is continuous across every seam.

use myelin_topology::{Disk, PeriodicDomain};
use tracing::trace;

use crate::{CylinderMesh, CylinderMeshBuilder, FragmentSource, Result};

/// Produces the original and wrapped fragments for each packed disk.
#[derive(Debug, Clone, Copy)]
pub struct PeriodicBoundaryStitcher {
    domain: PeriodicDomain,
    builder: CylinderMeshBuilder,
}

impl PeriodicBoundaryStitcher {
    pub fn new(domain: PeriodicDomain, builder: CylinderMeshBuilder) -> Self {
        Self { domain, builder }
    }

    pub fn domain(&self) -> &PeriodicDomain {
        &self.domain
    }

    pub fn builder(&self) -> &CylinderMeshBuilder {
        &self.builder
    }

    /// Translated copies only: none for an interior disk, one per crossed
    /// axis, plus the diagonal copy when the disk covers a voxel corner.
    pub fn wrapped_fragments(&self, disk_index: usize, disk: &Disk) -> Result<Vec<CylinderMesh>> {
        let offsets = self.domain.wrap_offsets(disk);
        if !offsets.is_empty() {
            trace!(disk_index, copies = offsets.len(), "Disk crosses voxel boundary");
        }

        offsets
            .into_iter()
            .map(|offset| {
                let translated = disk.translated(offset, self.domain.side());
                self.builder
                    .build(&translated, FragmentSource { disk_index, offset })
            })
            .collect()
    }

    /// The original fragment followed by its wrapped copies.
    pub fn fragments(&self, disk_index: usize, disk: &Disk) -> Result<Vec<CylinderMesh>> {
        let mut fragments = vec![self.builder.build(disk, FragmentSource::original(disk_index))?];
        fragments.extend(self.wrapped_fragments(disk_index, disk)?);
        Ok(fragments)
    }
}
