//! Circular fiber cross-sections.

use crate::{ImageOffset, Point2};

/// A disk in the packing plane: the cross-section of one cylinder.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Disk {
    /// Center in domain coordinates
    pub center: Point2,
    /// Radius in physical units
    pub radius: f64,
}

impl Disk {
    /// Create a new disk.
    pub const fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Cross-sectional area.
    #[inline]
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// Copy of this disk shifted into the tile at `offset`.
    pub fn translated(&self, offset: ImageOffset, side: f64) -> Self {
        Self {
            center: self.center + offset.translation(side),
            radius: self.radius,
        }
    }
}

impl std::fmt::Display for Disk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "disk at {} r={}", self.center, self.radius)
    }
}
