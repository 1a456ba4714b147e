//! 9-Image Periodic Neighborhood
//!
//! Under periodic identification every point has 9 relevant images in the
//! 3×3 block of tiles around the central voxel:
//! - 1 central image (the point itself)
//! - 4 axial images (shifted by ±L along x or y)
//! - 4 diagonal images (shifted by ±L along both axes)

use crate::{Point2, AXIAL_IMAGES, CENTRAL_IMAGES, DIAGONAL_IMAGES, IMAGES_PER_POINT};

/// A tile offset in units of the domain side length.
///
/// Each component is -1, 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageOffset {
    /// Tile shift along x
    pub dx: i8,
    /// Tile shift along y
    pub dy: i8,
}

impl ImageOffset {
    /// The central tile.
    pub const CENTRAL: Self = Self { dx: 0, dy: 0 };

    /// Create a new offset.
    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy }
    }

    /// The four axial offsets.
    pub const AXIAL_DIRECTIONS: [Self; AXIAL_IMAGES] = [
        Self { dx: 1, dy: 0 },  // East
        Self { dx: 0, dy: 1 },  // North
        Self { dx: -1, dy: 0 }, // West
        Self { dx: 0, dy: -1 }, // South
    ];

    /// The four diagonal offsets.
    pub const DIAGONAL_DIRECTIONS: [Self; DIAGONAL_IMAGES] = [
        Self { dx: 1, dy: 1 },
        Self { dx: -1, dy: 1 },
        Self { dx: -1, dy: -1 },
        Self { dx: 1, dy: -1 },
    ];

    /// Offset refers to the central tile.
    pub const fn is_central(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Offset shifts along exactly one axis.
    pub const fn is_axial(&self) -> bool {
        (self.dx == 0) != (self.dy == 0)
    }

    /// Offset shifts along both axes.
    pub const fn is_diagonal(&self) -> bool {
        self.dx != 0 && self.dy != 0
    }

    /// Translation vector for a domain of side `side`.
    #[inline]
    pub fn translation(&self, side: f64) -> Point2 {
        Point2::new(f64::from(self.dx) * side, f64::from(self.dy) * side)
    }
}

impl std::fmt::Display for ImageOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:+}, {:+}]", self.dx, self.dy)
    }
}

/// The full periodic neighborhood of a point.
pub struct Images;

impl Images {
    /// All 9 offsets: central first, then axial, then diagonal.
    pub fn all_offsets() -> [ImageOffset; IMAGES_PER_POINT] {
        let mut result = [ImageOffset::CENTRAL; IMAGES_PER_POINT];

        // Central (0), axial (1-4), diagonal (5-8)
        result[CENTRAL_IMAGES..CENTRAL_IMAGES + AXIAL_IMAGES]
            .copy_from_slice(&ImageOffset::AXIAL_DIRECTIONS);
        result[CENTRAL_IMAGES + AXIAL_IMAGES..].copy_from_slice(&ImageOffset::DIAGONAL_DIRECTIONS);

        result
    }

    /// Get all 9 images of a point in a domain of side `side`.
    pub fn of(point: Point2, side: f64) -> [Point2; IMAGES_PER_POINT] {
        Self::all_offsets().map(|offset| point + offset.translation(side))
    }

    /// Find the image of `target` nearest to `from`, with its offset.
    pub fn nearest(from: Point2, target: Point2, side: f64) -> (ImageOffset, f64) {
        Self::all_offsets()
            .into_iter()
            .map(|offset| (offset, from.distance(&(target + offset.translation(side)))))
            .fold((ImageOffset::CENTRAL, f64::INFINITY), |best, candidate| {
                if candidate.1 < best.1 {
                    candidate
                } else {
                    best
                }
            })
    }
}
