//! Open cylindrical tube meshes.
//!
//! A tube is two rings of `n` vertices, at `z = 0` and `z = H`, joined by
//! `2n` side triangles. There are no caps: the voxel top and bottom are
//! handled by the simulation engine.

use glam::DVec3;
use myelin_topology::{Disk, ImageOffset};

use crate::{Error, Result};

/// Ring resolution used when none is configured.
pub const DEFAULT_SEGMENTS: u32 = 32;

/// Fewest segments that still enclose a tube.
pub const MIN_SEGMENTS: u32 = 3;

/// Where a mesh fragment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FragmentSource {
    /// Index of the packed disk
    pub disk_index: usize,
    /// Tile the fragment was translated into (central for the original)
    pub offset: ImageOffset,
}

impl FragmentSource {
    /// The untranslated fragment of a disk.
    pub const fn original(disk_index: usize) -> Self {
        Self {
            disk_index,
            offset: ImageOffset::CENTRAL,
        }
    }
}

/// Triangulated side surface of one cylinder.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderMesh {
    /// Bottom ring (`0..n`) followed by top ring (`n..2n`)
    pub vertices: Vec<DVec3>,
    /// Counter-clockwise seen from outside
    pub triangles: Vec<[u32; 3]>,
    /// Cross-section this fragment was built from, already translated
    pub disk: Disk,
    /// Provenance
    pub source: FragmentSource,
}

impl CylinderMesh {
    /// This fragment is a periodic copy rather than the original.
    pub fn is_wrapped(&self) -> bool {
        !self.source.offset.is_central()
    }

    /// Unnormalized normal of triangle `index`.
    pub fn triangle_normal(&self, index: usize) -> DVec3 {
        let [a, b, c] = self.triangles[index].map(|i| self.vertices[i as usize]);
        (b - a).cross(c - a)
    }
}

/// Builds tube meshes of a fixed height and ring resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderMeshBuilder {
    segments: u32,
    height: f64,
}

impl CylinderMeshBuilder {
    /// Create a builder, rejecting degenerate resolution or height.
    pub fn new(segments: u32, height: f64) -> Result<Self> {
        if segments < MIN_SEGMENTS {
            return Err(Error::InvalidSegments {
                got: segments,
                min: MIN_SEGMENTS,
            });
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(Error::InvalidHeight(height));
        }
        Ok(Self { segments, height })
    }

    /// Points per ring.
    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Tube height `H`.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Build the tube for `disk`, which must already be in its final tile.
    pub fn build(&self, disk: &Disk, source: FragmentSource) -> Result<CylinderMesh> {
        if !disk.radius.is_finite() || disk.radius <= 0.0 {
            return Err(Error::DegenerateRadius {
                disk_index: source.disk_index,
                radius: disk.radius,
            });
        }

        let n = self.segments;
        let ring: Vec<(f64, f64)> = (0..n)
            .map(|k| {
                let theta = std::f64::consts::TAU * f64::from(k) / f64::from(n);
                (
                    disk.center.x + disk.radius * theta.cos(),
                    disk.center.y + disk.radius * theta.sin(),
                )
            })
            .collect();

        let mut vertices = Vec::with_capacity(2 * n as usize);
        vertices.extend(ring.iter().map(|&(x, y)| DVec3::new(x, y, 0.0)));
        vertices.extend(ring.iter().map(|&(x, y)| DVec3::new(x, y, self.height)));

        let mut triangles = Vec::with_capacity(2 * n as usize);
        for k in 0..n {
            let next = (k + 1) % n;
            let (b0, b1) = (k, next);
            let (t0, t1) = (n + k, n + next);
            // Rings run counter-clockwise, so (b0, b1, t0) faces outward.
            triangles.push([b0, b1, t0]);
            triangles.push([b1, t1, t0]);
        }

        Ok(CylinderMesh {
            vertices,
            triangles,
            disk: *disk,
            source,
        })
    }
}
