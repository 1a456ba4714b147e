//! Shared checks for the end-to-end tests.

use myelin_substrate::Substrate;
use myelin_topology::PeriodicDomain;
use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test harness; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Smallest `periodic_distance - r_i - r_j - margin` over all disk pairs,
/// checked exhaustively.
pub fn min_pair_clearance(substrate: &Substrate, margin: f64) -> Option<f64> {
    let domain = PeriodicDomain::new(substrate.voxel_side()).ok()?;
    let disks = substrate.disks();
    let mut clearance: Option<f64> = None;
    for (i, a) in disks.iter().enumerate() {
        for b in &disks[i + 1..] {
            let gap = domain.periodic_distance(a.center, b.center) - a.radius - b.radius - margin;
            clearance = Some(clearance.map_or(gap, |c| c.min(gap)));
        }
    }
    clearance
}

/// Bit patterns of the vertex array, for exact reproducibility checks.
pub fn vertex_bits(substrate: &Substrate) -> Vec<u64> {
    substrate.flat_vertices().iter().map(|v| v.to_bits()).collect()
}
