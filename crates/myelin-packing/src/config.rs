//! Packing parameters.

use crate::{Error, Result};

/// Default attempts per disk per shrink round.
pub const DEFAULT_MAX_ATTEMPTS_PER_DISK: u32 = 200;

/// Default radius decay applied between shrink rounds.
pub const DEFAULT_SHRINK_FACTOR: f64 = 0.95;

/// Default number of shrink rounds before a disk is dropped.
pub const DEFAULT_MAX_SHRINK_ROUNDS: u32 = 20;

/// Bounds on the rejection-sampling search.
///
/// The search always terminates: a disk is tried at most
/// `max_attempts_per_disk × (max_shrink_rounds + 1)` times.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackingConfig {
    /// Side length `L` of the periodic square domain
    pub side: f64,
    /// Upper bound on the achieved packing fraction
    pub target_fraction: f64,
    /// Minimum gap kept between any two disk boundaries
    pub margin: f64,
    /// Random positions tried per disk in each shrink round
    pub max_attempts_per_disk: u32,
    /// Radius multiplier applied after each failed round, in (0, 1)
    pub shrink_factor: f64,
    /// Shrink rounds before the disk is dropped (0 drops immediately)
    pub max_shrink_rounds: u32,
    /// Largest tolerated fraction of dropped disks, in [0, 1]
    pub drop_tolerance: f64,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            side: 20.0,
            target_fraction: 0.6,
            margin: 0.01,
            max_attempts_per_disk: DEFAULT_MAX_ATTEMPTS_PER_DISK,
            shrink_factor: DEFAULT_SHRINK_FACTOR,
            max_shrink_rounds: DEFAULT_MAX_SHRINK_ROUNDS,
            drop_tolerance: 0.2,
        }
    }
}

impl PackingConfig {
    /// Check every parameter is in range.
    pub fn validate(&self) -> Result<()> {
        if !self.side.is_finite() || self.side <= 0.0 {
            return Err(invalid(format!("side must be positive, got {}", self.side)));
        }
        if !(self.target_fraction > 0.0 && self.target_fraction <= 1.0) {
            return Err(invalid(format!(
                "target_fraction must be in (0, 1], got {}",
                self.target_fraction
            )));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(invalid(format!("margin must be >= 0, got {}", self.margin)));
        }
        if self.max_attempts_per_disk == 0 {
            return Err(invalid("max_attempts_per_disk must be at least 1".to_string()));
        }
        if !(self.shrink_factor > 0.0 && self.shrink_factor < 1.0) {
            return Err(invalid(format!(
                "shrink_factor must be in (0, 1), got {}",
                self.shrink_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.drop_tolerance) {
            return Err(invalid(format!(
                "drop_tolerance must be in [0, 1], got {}",
                self.drop_tolerance
            )));
        }
        Ok(())
    }

    /// Smallest fraction of its sampled radius a disk may shrink to.
    pub fn min_radius_ratio(&self) -> f64 {
        self.shrink_factor.powi(self.max_shrink_rounds.min(i32::MAX as u32) as i32)
    }

    /// Total area the placed disks may occupy.
    pub fn area_budget(&self) -> f64 {
        self.target_fraction * self.side * self.side
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfig(message)
}
