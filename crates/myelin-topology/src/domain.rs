//! The periodic square packing domain.
//!
//! The domain is `[0, L) × [0, L)` with `x ≡ x + L` and `y ≡ y + L`.
//! Distances follow the minimum-image convention.

use crate::{Disk, Error, ImageOffset, Images, Point2, Result};

/// Edges of the domain a disk extends across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeCrossing {
    /// Crosses x = 0
    pub left: bool,
    /// Crosses x = L
    pub right: bool,
    /// Crosses y = 0
    pub bottom: bool,
    /// Crosses y = L
    pub top: bool,
}

impl EdgeCrossing {
    /// Number of edges crossed.
    pub fn count(&self) -> usize {
        [self.left, self.right, self.bottom, self.top]
            .iter()
            .filter(|&&crossed| crossed)
            .count()
    }

    /// The disk lies strictly inside the domain.
    pub fn is_interior(&self) -> bool {
        self.count() == 0
    }

    /// Tile shifts along x that bring the crossing part back into view.
    fn x_shifts(&self) -> impl Iterator<Item = i8> {
        // Crossing x = 0 needs a copy one tile to the east, and vice versa.
        [(self.left, 1i8), (self.right, -1i8)]
            .into_iter()
            .filter_map(|(crossed, shift)| crossed.then_some(shift))
    }

    fn y_shifts(&self) -> impl Iterator<Item = i8> {
        [(self.bottom, 1i8), (self.top, -1i8)]
            .into_iter()
            .filter_map(|(crossed, shift)| crossed.then_some(shift))
    }
}

/// A square domain of side `L` with periodic boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodicDomain {
    side: f64,
}

impl PeriodicDomain {
    /// Create a domain, rejecting non-finite or non-positive sides.
    pub fn new(side: f64) -> Result<Self> {
        if !side.is_finite() || side <= 0.0 {
            return Err(Error::InvalidSide(side));
        }
        Ok(Self { side })
    }

    /// Side length `L`.
    #[inline]
    pub fn side(&self) -> f64 {
        self.side
    }

    /// Area `L²`.
    #[inline]
    pub fn area(&self) -> f64 {
        self.side * self.side
    }

    /// Point lies in the fundamental tile `[0, L)²`.
    pub fn contains(&self, point: Point2) -> bool {
        (0.0..self.side).contains(&point.x) && (0.0..self.side).contains(&point.y)
    }

    /// Map a point into the fundamental tile.
    pub fn wrap(&self, point: Point2) -> Point2 {
        Point2::new(self.wrap_coordinate(point.x), self.wrap_coordinate(point.y))
    }

    fn wrap_coordinate(&self, value: f64) -> f64 {
        let wrapped = value.rem_euclid(self.side);
        // rem_euclid of a tiny negative value can round up to exactly L.
        if wrapped >= self.side {
            0.0
        } else {
            wrapped
        }
    }

    /// Shortest periodic representative of a displacement.
    #[inline]
    pub fn minimum_image(&self, delta: Point2) -> Point2 {
        Point2::new(
            delta.x - self.side * (delta.x / self.side).round(),
            delta.y - self.side * (delta.y / self.side).round(),
        )
    }

    /// Distance between two points under the minimum-image convention.
    #[inline]
    pub fn periodic_distance(&self, a: Point2, b: Point2) -> f64 {
        self.minimum_image(b - a).length()
    }

    /// Distance from `a` to the nearest of the 9 images of `b`.
    ///
    /// Agrees with [`periodic_distance`](Self::periodic_distance) for points
    /// inside the fundamental tile.
    pub fn image_distance(&self, a: Point2, b: Point2) -> f64 {
        Images::nearest(a, b, self.side).1
    }

    /// Which domain edges a disk extends across.
    ///
    /// An edge is crossed when the distance from the center to it is
    /// strictly less than the radius.
    pub fn crossed_edges(&self, disk: &Disk) -> EdgeCrossing {
        let Disk { center, radius } = *disk;
        EdgeCrossing {
            left: center.x < radius,
            right: self.side - center.x < radius,
            bottom: center.y < radius,
            top: self.side - center.y < radius,
        }
    }

    /// Image offsets of the translated copies a disk needs to tile seamlessly.
    ///
    /// Axial shifts come first, then diagonal ones. A diagonal copy is only
    /// emitted when the disk contains the voxel corner it wraps around;
    /// otherwise that copy would lie entirely outside the voxel. A disk with
    /// `radius <= L/2` yields at most 3 offsets; an interior disk yields none.
    pub fn wrap_offsets(&self, disk: &Disk) -> Vec<ImageOffset> {
        let crossing = self.crossed_edges(disk);
        let xs: Vec<i8> = crossing.x_shifts().collect();
        let ys: Vec<i8> = crossing.y_shifts().collect();

        let mut offsets = Vec::with_capacity(xs.len() + ys.len() + xs.len() * ys.len());
        offsets.extend(xs.iter().map(|&dx| ImageOffset::new(dx, 0)));
        offsets.extend(ys.iter().map(|&dy| ImageOffset::new(0, dy)));
        for &dx in &xs {
            for &dy in &ys {
                if self.contains_corner(disk, dx, dy) {
                    offsets.push(ImageOffset::new(dx, dy));
                }
            }
        }
        offsets
    }

    /// The disk covers the corner opposite to the shift `(dx, dy)`: a `+1`
    /// shift wraps around the `0` edge, a `-1` shift around the `L` edge.
    fn contains_corner(&self, disk: &Disk, dx: i8, dy: i8) -> bool {
        let edge = |coord: f64, shift: i8| if shift > 0 { coord } else { self.side - coord };
        let gap_x = edge(disk.center.x, dx);
        let gap_y = edge(disk.center.y, dy);
        gap_x * gap_x + gap_y * gap_y < disk.radius * disk.radius
    }
}
