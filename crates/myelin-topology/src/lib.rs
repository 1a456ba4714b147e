//! Myelin Periodic Topology
//!
//! Geometry of the square packing domain in which fiber cross-sections are
//! placed.
//!
//! # Periodic Identification
//!
//! The domain `[0, L)²` is identified along both axes, so a disk leaving one
//! edge re-enters on the opposite one. Each point therefore has 9 relevant
//! images in the surrounding 3×3 block of tiles:
//! - 1 central image
//! - 4 axial images (shifted by ±L along one axis)
//! - 4 diagonal images (shifted along both axes)
//!
//! Distances are measured with the minimum-image convention, which picks the
//! nearest of those images.
//!
//! # Wrapping
//!
//! A disk whose extent crosses a domain edge needs translated copies so that
//! the tiled substrate is continuous: one copy per crossed axis plus the
//! diagonal copy when the disk covers the voxel corner.

mod disk;
mod domain;
mod error;
mod images;
mod point;

pub use disk::Disk;
pub use domain::{EdgeCrossing, PeriodicDomain};
pub use error::{Error, Result};
pub use images::{ImageOffset, Images};
pub use point::Point2;

/// Total number of images per point (invariant: always 9)
pub const IMAGES_PER_POINT: usize = 9;

/// The point itself
pub const CENTRAL_IMAGES: usize = 1;

/// Images shifted along a single axis
pub const AXIAL_IMAGES: usize = 4;

/// Images shifted along both axes
pub const DIAGONAL_IMAGES: usize = 4;

/// Translated copies needed by a disk with `radius <= L/2` in the worst case
/// (one covering a voxel corner).
pub const MAX_WRAP_COPIES: usize = 3;

// Compile-time assertion of the 9-image invariant
const _: () = assert!(CENTRAL_IMAGES + AXIAL_IMAGES + DIAGONAL_IMAGES == IMAGES_PER_POINT);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_invariant() {
        assert_eq!(
            CENTRAL_IMAGES + AXIAL_IMAGES + DIAGONAL_IMAGES,
            IMAGES_PER_POINT
        );
    }

    #[test]
    fn corner_disk_needs_the_most_copies() {
        let domain = PeriodicDomain::new(10.0).unwrap();
        let corner = Disk::new(Point2::new(0.2, 9.9), 1.0);
        assert_eq!(domain.wrap_offsets(&corner).len(), MAX_WRAP_COPIES);
    }
}
