//! Generation parameters.
//!
//! A [`SubstrateConfig`] is the complete, serializable input to one run:
//! the same config and seed always produce the same substrate.

use myelin_mesh::{CylinderMeshBuilder, SeamPolicy, DEFAULT_SEGMENTS};
use myelin_packing::{
    PackingConfig, DEFAULT_MAX_ATTEMPTS_PER_DISK, DEFAULT_MAX_SHRINK_ROUNDS, DEFAULT_SHRINK_FACTOR,
};
use myelin_sampling::DistributionSpec;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Weld tolerance relative to the voxel side when none is configured.
pub const DEFAULT_WELD_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Everything needed to generate one substrate.
///
/// Missing JSON fields fall back to [`SubstrateConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstrateConfig {
    /// Radius population
    pub distribution: DistributionSpec,
    /// Number of radii to draw
    pub count: usize,
    /// Side length `L` of the square cross-section
    pub voxel_side: f64,
    /// Height `H` every cylinder spans
    pub voxel_height: f64,
    /// Upper bound on the packing fraction
    pub target_fraction: f64,
    /// Minimum gap between disk boundaries
    pub margin: f64,
    pub max_attempts_per_disk: u32,
    pub shrink_factor: f64,
    pub max_shrink_rounds: u32,
    /// Largest tolerated fraction of dropped disks
    pub drop_tolerance: f64,
    /// Points per cylinder ring
    pub segments: u32,
    /// Whether fragments are welded at the seams
    pub seam: SeamPolicy,
    /// Weld distance as a fraction of `voxel_side`
    pub weld_relative_tolerance: f64,
    /// Seed for the single generator threaded through every stage
    pub seed: u64,
}

impl Default for SubstrateConfig {
    fn default() -> Self {
        let packing = PackingConfig::default();
        Self {
            distribution: DistributionSpec::gamma(2.0, 1.0),
            count: 50,
            voxel_side: packing.side,
            voxel_height: packing.side,
            target_fraction: packing.target_fraction,
            margin: packing.margin,
            max_attempts_per_disk: DEFAULT_MAX_ATTEMPTS_PER_DISK,
            shrink_factor: DEFAULT_SHRINK_FACTOR,
            max_shrink_rounds: DEFAULT_MAX_SHRINK_ROUNDS,
            drop_tolerance: packing.drop_tolerance,
            segments: DEFAULT_SEGMENTS,
            seam: SeamPolicy::Weld,
            weld_relative_tolerance: DEFAULT_WELD_RELATIVE_TOLERANCE,
            seed: 42,
        }
    }
}

impl SubstrateConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every parameter before any randomness is consumed.
    pub fn validate(&self) -> Result<()> {
        self.distribution.validate()?;
        self.packing_config().validate()?;

        CylinderMeshBuilder::new(self.segments, self.voxel_height)?;
        if !self.weld_relative_tolerance.is_finite() || self.weld_relative_tolerance <= 0.0 {
            return Err(Error::Config(format!(
                "weld_relative_tolerance must be positive, got {}",
                self.weld_relative_tolerance
            )));
        }
        Ok(())
    }

    /// The packing stage's view of this config.
    pub fn packing_config(&self) -> PackingConfig {
        PackingConfig {
            side: self.voxel_side,
            target_fraction: self.target_fraction,
            margin: self.margin,
            max_attempts_per_disk: self.max_attempts_per_disk,
            shrink_factor: self.shrink_factor,
            max_shrink_rounds: self.max_shrink_rounds,
            drop_tolerance: self.drop_tolerance,
        }
    }

    /// Absolute weld distance.
    pub fn weld_tolerance(&self) -> f64 {
        self.weld_relative_tolerance * self.voxel_side
    }

    /// Same parameters, different seed.
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }
}
