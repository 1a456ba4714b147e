//! Drawing radius populations.

use rand::Rng;
use rand_distr::Distribution;
use tracing::debug;

use crate::{DistributionSpec, Error, RadiusSet, Result};

/// Draw budget per radius before sampling gives up.
pub const DEFAULT_MAX_DRAWS_PER_RADIUS: u32 = 10_000;

/// Draws radius populations from a validated [`DistributionSpec`].
///
/// Out-of-range draws are redrawn rather than clamped, so the accepted
/// values follow the distribution truncated to `[min_radius, max_radius]`.
/// All randomness comes from the generator passed to [`sample`](Self::sample).
#[derive(Debug, Clone)]
pub struct RadiusSampler {
    spec: DistributionSpec,
    max_draws_per_radius: u32,
}

impl RadiusSampler {
    /// Validate the spec up front; no sampling work happens on failure.
    pub fn new(spec: DistributionSpec) -> Result<Self> {
        spec.validate()?;
        Ok(Self {
            spec,
            max_draws_per_radius: DEFAULT_MAX_DRAWS_PER_RADIUS,
        })
    }

    /// Override the per-radius draw budget (at least one draw is always made).
    pub fn with_max_draws_per_radius(mut self, draws: u32) -> Self {
        self.max_draws_per_radius = draws.max(1);
        self
    }

    /// The distribution being sampled.
    pub fn spec(&self) -> &DistributionSpec {
        &self.spec
    }

    /// Draw exactly `count` radii.
    ///
    /// The result is sorted descending. Identical generator state yields
    /// identical output.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<RadiusSet> {
        let distribution = self.spec.sampler()?;
        let scale = self.spec.unit_scale;

        let mut radii = Vec::with_capacity(count);
        let mut rejected: u64 = 0;

        for _ in 0..count {
            let mut accepted = None;
            for _ in 0..self.max_draws_per_radius {
                let radius = distribution.sample(rng) * scale;
                if self.spec.accepts(radius) {
                    accepted = Some(radius);
                    break;
                }
                rejected += 1;
            }

            match accepted {
                Some(radius) => radii.push(radius),
                None => {
                    return Err(Error::RejectionBudgetExhausted {
                        accepted: radii.len(),
                        requested: count,
                        budget: self.max_draws_per_radius,
                    })
                }
            }
        }

        debug!(
            distribution = self.spec.kind.name(),
            count,
            rejected,
            "Sampled radius population"
        );

        RadiusSet::new(radii)
    }
}
