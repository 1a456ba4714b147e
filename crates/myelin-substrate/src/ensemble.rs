//! Independent generations over many seeds.

use rayon::prelude::*;
use tracing::debug;

use crate::{generate, Result, Substrate, SubstrateConfig};

/// Generate one substrate per seed in parallel.
///
/// Each run owns its generator, so results match sequential calls to
/// [`generate`] and come back in `seeds` order.
pub fn generate_ensemble(config: &SubstrateConfig, seeds: &[u64]) -> Vec<Result<Substrate>> {
    debug!(members = seeds.len(), "Generating ensemble");
    seeds
        .par_iter()
        .map(|&seed| generate(&config.with_seed(seed)))
        .collect()
}
