//! Merging fragments into one indexed mesh.
//!
//! Fragments either stay combinatorially separate (plain concatenation) or
//! are welded: vertices that coincide within a tolerance collapse into one,
//! using a spatial hash keyed on `floor(position / tolerance)`.
//!
//! A welder bound to a [`PeriodicDomain`] compares positions modulo the
//! voxel side. A wrapped copy then folds onto its original: its vertices
//! merge into the original's and its faces become duplicates that are
//! dropped, leaving each fiber surface once in a mesh that is continuous
//! across the periodic seams.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use glam::DVec3;
use myelin_topology::{PeriodicDomain, Point2};
use tracing::{debug, warn};

use crate::{CylinderMesh, Error, Result};

/// How coincident vertices of separate fragments are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SeamPolicy {
    /// Keep every fragment, wrapped copies included, as explicit geometry.
    Separate,
    /// Merge vertices that coincide modulo the voxel side, folding wrapped
    /// copies onto their originals.
    #[default]
    Weld,
}

/// A flat vertex pool with triangles indexing into it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndexedMesh {
    /// Deduplicated vertex pool
    pub vertices: Vec<DVec3>,
    /// Index triples into `vertices`
    pub triangles: Vec<[u32; 3]>,
    /// Triangles contributed by each input fragment, in input order
    pub fragment_triangles: Vec<Range<usize>>,
}

impl IndexedMesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// `[x0, y0, z0, x1, ...]`
    pub fn flat_vertices(&self) -> Vec<f64> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }

    /// `[a0, b0, c0, a1, ...]`
    pub fn flat_triangles(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Concatenate fragments without merging anything.
    pub fn concatenate(fragments: &[CylinderMesh]) -> Result<Self> {
        let mut mesh = Self::default();
        for fragment in fragments {
            let base = index(mesh.vertices.len())?;
            index(mesh.vertices.len() + fragment.vertices.len())?;

            let start = mesh.triangles.len();
            mesh.vertices.extend_from_slice(&fragment.vertices);
            mesh.triangles
                .extend(fragment.triangles.iter().map(|tri| tri.map(|i| base + i)));
            mesh.fragment_triangles.push(start..mesh.triangles.len());
        }
        Ok(mesh)
    }
}

/// Result of a weld pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Welded {
    /// The merged mesh
    pub mesh: IndexedMesh,
    /// Input vertices that were merged into an earlier one
    pub merged_vertices: usize,
    /// Triangles dropped because two of their corners merged
    pub collapsed_triangles: usize,
    /// Triangles dropped because an identical face was already emitted
    pub duplicate_triangles: usize,
}

type Cell = (i64, i64, i64);

/// Merges vertices that lie within `tolerance` of each other.
///
/// The first vertex seen in a cluster is kept, so the output depends only
/// on fragment order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexWelder {
    tolerance: f64,
    domain: Option<PeriodicDomain>,
}

impl VertexWelder {
    /// Create a welder; `tolerance` must be finite and positive.
    pub fn new(tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(Error::InvalidTolerance(tolerance));
        }
        Ok(Self {
            tolerance,
            domain: None,
        })
    }

    /// Compare positions modulo `domain`'s side in x and y.
    pub fn periodic(self, domain: PeriodicDomain) -> Self {
        Self {
            domain: Some(domain),
            ..self
        }
    }

    /// Merge distance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The periodic domain, if positions are compared modulo its side.
    pub fn domain(&self) -> Option<&PeriodicDomain> {
        self.domain.as_ref()
    }

    /// Whole cells per axis across the periodic side. A trailing partial
    /// cell shares index 0 with the cell it wraps onto.
    fn period_cells(&self) -> Option<i64> {
        self.domain
            .map(|d| ((d.side() / self.tolerance).floor() as i64).max(1))
    }

    fn cell(&self, v: DVec3) -> Cell {
        let key = match self.domain {
            Some(domain) => {
                let wrapped = domain.wrap(Point2::new(v.x, v.y));
                DVec3::new(wrapped.x, wrapped.y, v.z)
            }
            None => v,
        };
        let cell = (
            (key.x / self.tolerance).floor() as i64,
            (key.y / self.tolerance).floor() as i64,
            (key.z / self.tolerance).floor() as i64,
        );
        match self.period_cells() {
            Some(n) => (cell.0.rem_euclid(n), cell.1.rem_euclid(n), cell.2),
            None => cell,
        }
    }

    fn distance(&self, a: DVec3, b: DVec3) -> f64 {
        match self.domain {
            Some(domain) => {
                let planar = domain.minimum_image(Point2::new(a.x - b.x, a.y - b.y));
                DVec3::new(planar.x, planar.y, a.z - b.z).length()
            }
            None => a.distance(b),
        }
    }

    /// Weld all fragments into one mesh.
    pub fn weld(&self, fragments: &[CylinderMesh]) -> Result<Welded> {
        let mut grid: HashMap<Cell, Vec<u32>> = HashMap::new();
        let mut faces: HashSet<[u32; 3]> = HashSet::new();
        let mut mesh = IndexedMesh::default();
        let mut merged_vertices = 0;
        let mut collapsed_triangles = 0;
        let mut duplicate_triangles = 0;

        for fragment in fragments {
            let remap = fragment
                .vertices
                .iter()
                .map(|&v| match self.find(&grid, &mesh.vertices, v) {
                    Some(existing) => {
                        merged_vertices += 1;
                        Ok(existing)
                    }
                    None => {
                        let id = index(mesh.vertices.len())?;
                        mesh.vertices.push(v);
                        grid.entry(self.cell(v)).or_default().push(id);
                        Ok(id)
                    }
                })
                .collect::<Result<Vec<u32>>>()?;

            let start = mesh.triangles.len();
            for tri in &fragment.triangles {
                let [a, b, c] = tri.map(|i| remap[i as usize]);
                if a == b || b == c || a == c {
                    collapsed_triangles += 1;
                } else if !faces.insert(canonical_face([a, b, c])) {
                    duplicate_triangles += 1;
                } else {
                    mesh.triangles.push([a, b, c]);
                }
            }
            mesh.fragment_triangles.push(start..mesh.triangles.len());
        }

        if collapsed_triangles > 0 {
            warn!(
                collapsed_triangles,
                tolerance = self.tolerance,
                "Weld collapsed triangles; tolerance may be too coarse"
            );
        }
        debug!(
            vertices = mesh.vertices.len(),
            triangles = mesh.triangles.len(),
            merged_vertices,
            duplicate_triangles,
            periodic = self.domain.is_some(),
            "Welded fragments"
        );

        Ok(Welded {
            mesh,
            merged_vertices,
            collapsed_triangles,
            duplicate_triangles,
        })
    }

    /// Lowest stored vertex within tolerance of `v`, searching the 27 cells around it.
    fn find(&self, grid: &HashMap<Cell, Vec<u32>>, pool: &[DVec3], v: DVec3) -> Option<u32> {
        let (cx, cy, cz) = self.cell(v);
        let wrap = |c: i64| match self.period_cells() {
            Some(n) => c.rem_euclid(n),
            None => c,
        };
        let mut best: Option<u32> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(ids) = grid.get(&(wrap(cx + dx), wrap(cy + dy), cz + dz)) else {
                        continue;
                    };
                    for &id in ids {
                        if self.distance(pool[id as usize], v) <= self.tolerance
                            && best.map_or(true, |b| id < b)
                        {
                            best = Some(id);
                        }
                    }
                }
            }
        }
        best
    }
}

/// Rotate so the smallest index leads; winding is preserved.
fn canonical_face([a, b, c]: [u32; 3]) -> [u32; 3] {
    if a <= b && a <= c {
        [a, b, c]
    } else if b <= a && b <= c {
        [b, c, a]
    } else {
        [c, a, b]
    }
}

fn index(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::TooManyVertices(len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CylinderMeshBuilder, FragmentSource};
    use myelin_topology::{Disk, ImageOffset, Point2};

    fn tube(x: f64, y: f64, disk_index: usize) -> CylinderMesh {
        CylinderMeshBuilder::new(8, 4.0)
            .unwrap()
            .build(&Disk::new(Point2::new(x, y), 1.0), FragmentSource::original(disk_index))
            .unwrap()
    }

    #[test]
    fn concatenate_offsets_indices() {
        let mesh = IndexedMesh::concatenate(&[tube(2.0, 2.0, 0), tube(6.0, 6.0, 1)]).unwrap();
        assert_eq!(mesh.vertex_count(), 32);
        assert_eq!(mesh.triangle_count(), 32);
        assert_eq!(mesh.fragment_triangles, vec![0..16, 16..32]);
        assert!(mesh.triangles[16..].iter().flatten().all(|&i| i >= 16));
    }

    #[test]
    fn flat_arrays_have_matching_lengths() {
        let mesh = IndexedMesh::concatenate(&[tube(2.0, 2.0, 0)]).unwrap();
        assert_eq!(mesh.flat_vertices().len(), 3 * mesh.vertex_count());
        assert_eq!(mesh.flat_triangles().len(), 3 * mesh.triangle_count());
        assert_eq!(&mesh.flat_vertices()[..3], &mesh.vertices[0].to_array());
    }

    #[test]
    fn disjoint_fragments_are_untouched() {
        let welder = VertexWelder::new(1e-9).unwrap();
        let welded = welder.weld(&[tube(2.0, 2.0, 0), tube(6.0, 6.0, 1)]).unwrap();
        assert_eq!(welded.merged_vertices, 0);
        assert_eq!(welded.collapsed_triangles, 0);
        assert_eq!(welded.duplicate_triangles, 0);
        assert_eq!(
            welded.mesh,
            IndexedMesh::concatenate(&[tube(2.0, 2.0, 0), tube(6.0, 6.0, 1)]).unwrap()
        );
    }

    #[test]
    fn coincident_fragments_share_vertices() {
        let welder = VertexWelder::new(1e-9).unwrap();
        let mut copy = tube(2.0, 2.0, 0);
        copy.source.offset = ImageOffset::new(1, 0);
        // Perturb below tolerance.
        for v in &mut copy.vertices {
            v.x += 1e-12;
        }

        let welded = welder.weld(&[tube(2.0, 2.0, 0), copy]).unwrap();
        assert_eq!(welded.mesh.vertex_count(), 16);
        assert_eq!(welded.merged_vertices, 16);
        assert_eq!(welded.duplicate_triangles, 16);
        assert_eq!(welded.mesh.triangle_count(), 16);
        assert_eq!(welded.mesh.fragment_triangles, vec![0..16, 16..16]);
    }

    #[test]
    fn periodic_weld_folds_wrapped_copy_onto_original() {
        let domain = PeriodicDomain::new(10.0).unwrap();
        let builder = CylinderMeshBuilder::new(8, 4.0).unwrap();
        let disk = Disk::new(Point2::new(9.5, 5.0), 1.0);
        let source = FragmentSource { disk_index: 0, offset: ImageOffset::new(-1, 0) };
        let original = builder.build(&disk, FragmentSource::original(0)).unwrap();
        let copy = builder.build(&disk.translated(source.offset, 10.0), source).unwrap();
        let fragments = [original.clone(), copy];

        let plain = VertexWelder::new(1e-8).unwrap().weld(&fragments).unwrap();
        assert_eq!(plain.merged_vertices, 0);
        assert_eq!(plain.mesh.vertex_count(), 32);

        let welded = VertexWelder::new(1e-8).unwrap().periodic(domain).weld(&fragments).unwrap();
        assert_eq!(welded.merged_vertices, 16);
        assert_eq!(welded.duplicate_triangles, 16);
        assert_eq!(welded.collapsed_triangles, 0);
        assert_eq!(welded.mesh.vertices, original.vertices);
        assert_eq!(welded.mesh.triangles, original.triangles);
        assert_eq!(welded.mesh.fragment_triangles, vec![0..16, 16..16]);
    }

    #[test]
    fn periodic_match_across_the_wrap_point() {
        let domain = PeriodicDomain::new(10.0).unwrap();
        let welder = VertexWelder::new(1e-6).unwrap().periodic(domain);
        let a = DVec3::new(-1e-8, 3.0, 1.0);
        let b = DVec3::new(10.0 - 1e-8, 3.0, 1.0);
        assert_eq!(welder.cell(a), welder.cell(b));

        // Just inside L on one side, just past 0 on the other.
        let c = DVec3::new(1e-7, 3.0, 1.0);
        let mut grid = HashMap::new();
        grid.insert(welder.cell(b), vec![0u32]);
        assert_eq!(welder.find(&grid, &[b], c), Some(0));
        assert!(welder.distance(b, c) < 1e-6);
    }

    #[test]
    fn periodic_weld_keeps_distinct_tubes_apart() {
        let domain = PeriodicDomain::new(10.0).unwrap();
        let welder = VertexWelder::new(1e-9).unwrap().periodic(domain);
        let welded = welder.weld(&[tube(2.0, 2.0, 0), tube(6.0, 6.0, 1)]).unwrap();
        assert_eq!(welded.merged_vertices, 0);
        assert_eq!(welded.duplicate_triangles, 0);
        assert_eq!(welded.mesh.vertex_count(), 32);
    }

    #[test]
    fn canonical_face_preserves_winding() {
        assert_eq!(canonical_face([5, 2, 9]), [2, 9, 5]);
        assert_eq!(canonical_face([9, 5, 2]), [2, 9, 5]);
        assert_eq!(canonical_face([2, 5, 9]), [2, 5, 9]);
        assert_ne!(canonical_face([2, 9, 5]), canonical_face([2, 5, 9]));
    }

    #[test]
    fn vertices_across_cell_boundary_still_merge() {
        let welder = VertexWelder::new(1.0).unwrap();
        let a = DVec3::new(0.999, 0.0, 0.0);
        let b = DVec3::new(1.001, 0.0, 0.0);
        assert_ne!(welder.cell(a), welder.cell(b));

        let mut grid = HashMap::new();
        grid.insert(welder.cell(a), vec![0u32]);
        assert_eq!(welder.find(&grid, &[a], b), Some(0));
    }

    #[test]
    fn coarse_tolerance_collapses_triangles() {
        // Ring spacing for r = 1, n = 8 is ~0.77.
        let welder = VertexWelder::new(1.0).unwrap();
        let welded = welder.weld(&[tube(2.0, 2.0, 0)]).unwrap();
        assert!(welded.collapsed_triangles > 0);
        assert!(welded.mesh.triangle_count() < 16);
    }

    #[test]
    fn rejects_bad_tolerance() {
        assert_eq!(VertexWelder::new(0.0), Err(Error::InvalidTolerance(0.0)));
        assert!(VertexWelder::new(f64::NAN).is_err());
    }

    #[test]
    fn default_policy_welds() {
        assert_eq!(SeamPolicy::default(), SeamPolicy::Weld);
    }
}
