//! Largest-first random sequential packing with periodic boundaries.
//!
//! Each radius is tried at uniformly random positions; a position is accepted
//! iff its periodic distance to every accepted disk is at least the sum of
//! radii plus the clearance margin. Accepted disks are never moved, so the
//! result is a greedy local optimum.

use myelin_sampling::RadiusSet;
use myelin_topology::{Disk, PeriodicDomain, Point2};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::{Error, PackedLayout, PackingConfig, PlacementOutcome, Result};

/// Places disks into a periodic square domain.
#[derive(Debug, Clone)]
pub struct PeriodicDiskPacker {
    config: PackingConfig,
    domain: PeriodicDomain,
}

/// Result of searching for one radius.
struct Search {
    placed: Option<(Disk, u32)>,
    attempts: u32,
}

impl PeriodicDiskPacker {
    /// Create a packer, validating the configuration.
    pub fn new(config: PackingConfig) -> Result<Self> {
        config.validate()?;
        let domain = PeriodicDomain::new(config.side)?;
        Ok(Self { config, domain })
    }

    /// The configuration in use.
    pub fn config(&self) -> &PackingConfig {
        &self.config
    }

    /// The periodic domain disks are placed in.
    pub fn domain(&self) -> &PeriodicDomain {
        &self.domain
    }

    /// Pack `radii` (already largest first) using `rng` for positions.
    ///
    /// Fails with [`Error::Infeasible`] only when the fraction of dropped
    /// disks exceeds `drop_tolerance`.
    pub fn pack<R: Rng + ?Sized>(&self, radii: &RadiusSet, rng: &mut R) -> Result<PackedLayout> {
        let budget = self.config.area_budget();
        let mut disks: Vec<Disk> = Vec::with_capacity(radii.len());
        let mut outcomes = Vec::with_capacity(radii.len());
        let mut placed_area = 0.0;

        for radius in radii.iter() {
            let Some(start) = self.budget_radius(radius, budget - placed_area) else {
                debug!(radius, "Skipping disk beyond density target");
                outcomes.push(PlacementOutcome::Skipped { radius });
                continue;
            };

            let search = self.search(&disks, start, rng);
            let outcome = match search.placed {
                Some((disk, 0)) if start == radius => {
                    placed_area += disk.area();
                    disks.push(disk);
                    PlacementOutcome::Accepted {
                        disk_index: disks.len() - 1,
                        attempts: search.attempts,
                    }
                }
                Some((disk, rounds)) => {
                    debug!(radius, shrunk = disk.radius, rounds, "Placed shrunk disk");
                    placed_area += disk.area();
                    disks.push(disk);
                    PlacementOutcome::Shrunk {
                        disk_index: disks.len() - 1,
                        original_radius: radius,
                        rounds,
                        attempts: search.attempts,
                    }
                }
                None => {
                    warn!(radius, attempts = search.attempts, "Dropping disk: no clear position");
                    PlacementOutcome::Dropped {
                        original_radius: radius,
                        attempts: search.attempts,
                    }
                }
            };
            outcomes.push(outcome);
        }

        let layout = PackedLayout::new(self.domain, self.config.margin, disks, outcomes);
        let dropped = layout.dropped_count();
        let total = radii.len();

        info!(
            placed = layout.disks().len(),
            dropped,
            skipped = layout.skipped_count(),
            shrunk = layout.shrunk_count(),
            fraction = layout.packing_fraction(),
            attempts = layout.total_attempts(),
            "Packing finished"
        );

        if total > 0 && dropped as f64 > self.config.drop_tolerance * total as f64 {
            return Err(Error::Infeasible {
                dropped,
                total,
                tolerance: self.config.drop_tolerance,
            });
        }

        Ok(layout)
    }

    /// Radius to search with given the area still available under the
    /// density target, or `None` when the disk would have to shrink below
    /// the floor the shrink rounds can reach.
    fn budget_radius(&self, radius: f64, remaining: f64) -> Option<f64> {
        if std::f64::consts::PI * radius * radius <= remaining {
            return Some(radius);
        }
        let mut fitted = (remaining.max(0.0) / std::f64::consts::PI).sqrt();
        // Keep the rounded area inside the budget.
        if std::f64::consts::PI * fitted * fitted > remaining {
            fitted *= 1.0 - 4.0 * f64::EPSILON;
        }
        if fitted > 0.0 && fitted >= radius * self.config.min_radius_ratio() {
            debug!(radius, fitted, "Fitting disk to remaining density budget");
            Some(fitted)
        } else {
            None
        }
    }

    /// Try one radius through all shrink rounds.
    fn search<R: Rng + ?Sized>(&self, placed: &[Disk], radius: f64, rng: &mut R) -> Search {
        let side = self.domain.side();
        let mut candidate = radius;
        let mut attempts = 0;

        for round in 0..=self.config.max_shrink_rounds {
            if round > 0 {
                candidate *= self.config.shrink_factor;
            }
            // A disk wider than the domain overlaps its own image.
            if 2.0 * candidate > side {
                continue;
            }

            for _ in 0..self.config.max_attempts_per_disk {
                attempts += 1;
                let center = Point2::new(rng.gen_range(0.0..side), rng.gen_range(0.0..side));
                let disk = Disk::new(center, candidate);
                if self.is_clear(placed, &disk) {
                    return Search {
                        placed: Some((disk, round)),
                        attempts,
                    };
                }
            }
        }

        Search {
            placed: None,
            attempts,
        }
    }

    /// No accepted disk is closer than the sum of radii plus margin.
    pub fn is_clear(&self, placed: &[Disk], candidate: &Disk) -> bool {
        placed.iter().all(|other| {
            self.domain.periodic_distance(other.center, candidate.center)
                >= other.radius + candidate.radius + self.config.margin
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    fn packer(config: PackingConfig) -> PeriodicDiskPacker {
        PeriodicDiskPacker::new(config).unwrap()
    }

    fn radii(values: &[f64]) -> RadiusSet {
        RadiusSet::new(values.to_vec()).unwrap()
    }

    fn assert_no_overlap(layout: &PackedLayout) {
        let domain = layout.domain();
        let disks = layout.disks();
        for i in 0..disks.len() {
            for j in (i + 1)..disks.len() {
                let distance = domain.periodic_distance(disks[i].center, disks[j].center);
                let required = disks[i].radius + disks[j].radius + layout.margin();
                assert!(
                    distance >= required,
                    "disks {} and {} overlap: {} < {}",
                    i,
                    j,
                    distance,
                    required
                );
            }
        }
    }

    #[test]
    fn zero_disks_give_empty_layout() {
        let layout = packer(PackingConfig::default())
            .pack(&RadiusSet::empty(), &mut ChaChaRng::seed_from_u64(0))
            .unwrap();
        assert!(layout.disks().is_empty());
        assert_eq!(layout.packing_fraction(), 0.0);
        assert_eq!(layout.dropped_count(), 0);
    }

    #[test]
    fn single_half_width_disk_accepted_first_try() {
        let config = PackingConfig {
            side: 10.0,
            target_fraction: 1.0,
            ..PackingConfig::default()
        };
        for seed in 0..20 {
            let layout = packer(config)
                .pack(&radii(&[5.0]), &mut ChaChaRng::seed_from_u64(seed))
                .unwrap();
            assert_eq!(
                layout.outcomes(),
                &[PlacementOutcome::Accepted { disk_index: 0, attempts: 1 }]
            );
            assert!(layout.domain().contains(layout.disks()[0].center));
        }
    }

    #[test]
    fn oversized_disk_is_shrunk_until_it_fits() {
        let config = PackingConfig {
            side: 20.0,
            target_fraction: 1.0,
            ..PackingConfig::default()
        };
        let layout = packer(config)
            .pack(&radii(&[11.0]), &mut ChaChaRng::seed_from_u64(1))
            .unwrap();

        // 11 × 0.95² ≈ 9.93 is the first radius with 2r ≤ 20.
        match layout.outcomes()[0] {
            PlacementOutcome::Shrunk { rounds, attempts, original_radius, .. } => {
                assert_eq!(rounds, 2);
                assert_eq!(attempts, 1);
                assert_eq!(original_radius, 11.0);
            }
            other => panic!("expected shrunk outcome, got {:?}", other),
        }
        assert!(layout.disks()[0].radius <= 10.0);
        assert_eq!(layout.shrunk_count(), 1);
    }

    #[test]
    fn density_target_skips_surplus() {
        let config = PackingConfig {
            side: 10.0,
            target_fraction: 0.3,
            ..PackingConfig::default()
        };
        // Budget 30: the first 3.0 uses 28.3. Fitting the second 3.0 into the
        // remaining 1.7 needs r ≈ 0.74, below the 0.95^20 floor; a 1.0 at
        // r ≈ 0.74 is above it.
        let layout = packer(config)
            .pack(&radii(&[3.0, 3.0, 1.0]), &mut ChaChaRng::seed_from_u64(5))
            .unwrap();

        assert_eq!(layout.skipped_count(), 1);
        assert_eq!(layout.outcomes()[1], PlacementOutcome::Skipped { radius: 3.0 });
        match layout.outcomes()[2] {
            PlacementOutcome::Shrunk { original_radius, rounds, .. } => {
                assert_eq!(original_radius, 1.0);
                assert_eq!(rounds, 0);
            }
            other => panic!("expected budget-fitted disk, got {:?}", other),
        }
        assert!(layout.packing_fraction() <= 0.3 + 1e-12);
        assert!((layout.packing_fraction() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn overshooting_disk_fills_remaining_budget() {
        let config = PackingConfig {
            side: 10.0,
            target_fraction: 0.35,
            ..PackingConfig::default()
        };
        // Budget 35: the second 3.0 is fitted to the remaining 6.7, after
        // which nothing is left for the 1.0.
        let layout = packer(config)
            .pack(&radii(&[3.0, 3.0, 1.0]), &mut ChaChaRng::seed_from_u64(5))
            .unwrap();

        assert_eq!(layout.disks().len(), 2);
        assert_eq!(layout.shrunk_count(), 1);
        assert!(layout.disks()[1].radius < 3.0);
        assert_eq!(layout.outcomes()[2], PlacementOutcome::Skipped { radius: 1.0 });
        assert!(layout.packing_fraction() <= 0.35 + 1e-12);
        assert_no_overlap(&layout);
    }

    #[test]
    fn single_disk_is_placed_under_default_target() {
        // Default target 0.6 holds less area than a disk with r = L/2.
        for r in [10.0, 9.0, 8.8, 5.0] {
            for seed in 0..10 {
                let layout = packer(PackingConfig::default())
                    .pack(&radii(&[r]), &mut ChaChaRng::seed_from_u64(seed))
                    .unwrap();
                assert_eq!(layout.disks().len(), 1, "r = {r}");
                assert_eq!(layout.outcomes()[0].attempts(), 1);
                assert!(layout.packing_fraction() <= 0.6 + 1e-12);
            }
        }
    }

    #[test]
    fn impossible_density_is_infeasible() {
        let config = PackingConfig {
            side: 10.0,
            target_fraction: 1.0,
            margin: 0.0,
            max_attempts_per_disk: 50,
            max_shrink_rounds: 0,
            drop_tolerance: 0.0,
            ..PackingConfig::default()
        };
        // Five 2.4-radius disks would need ~90% coverage.
        let result = packer(config).pack(&radii(&[2.4; 5]), &mut ChaChaRng::seed_from_u64(9));
        assert!(matches!(
            result,
            Err(Error::Infeasible { total: 5, dropped, .. }) if dropped >= 1
        ));
    }

    #[test]
    fn drop_tolerance_allows_partial_layouts() {
        let config = PackingConfig {
            side: 10.0,
            target_fraction: 1.0,
            margin: 0.0,
            max_attempts_per_disk: 50,
            max_shrink_rounds: 0,
            drop_tolerance: 1.0,
            ..PackingConfig::default()
        };
        let layout = packer(config)
            .pack(&radii(&[2.4; 5]), &mut ChaChaRng::seed_from_u64(9))
            .unwrap();
        assert!(layout.dropped_count() >= 1);
        assert_no_overlap(&layout);
    }

    #[test]
    fn same_seed_same_layout() {
        let set = radii(&[2.0, 1.5, 1.5, 1.0, 1.0, 0.8, 0.5, 0.5]);
        let packer = packer(PackingConfig::default());

        let a = packer.pack(&set, &mut ChaChaRng::seed_from_u64(42)).unwrap();
        let b = packer.pack(&set, &mut ChaChaRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);

        let c = packer.pack(&set, &mut ChaChaRng::seed_from_u64(7)).unwrap();
        assert_ne!(a.disks(), c.disks());
    }

    #[test]
    fn is_clear_respects_margin_across_seam() {
        let config = PackingConfig {
            side: 10.0,
            margin: 0.5,
            ..PackingConfig::default()
        };
        let packer = packer(config);
        let placed = [Disk::new(Point2::new(0.5, 5.0), 1.0)];

        // 2.0 apart through the seam: needs 1 + 1 + 0.5.
        assert!(!packer.is_clear(&placed, &Disk::new(Point2::new(8.5, 5.0), 1.0)));
        assert!(packer.is_clear(&placed, &Disk::new(Point2::new(8.0, 5.0), 1.0)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn accepted_disks_never_overlap(
            seed in any::<u64>(),
            values in prop::collection::vec(0.2f64..2.0, 0..16),
        ) {
            let config = PackingConfig {
                side: 12.0,
                drop_tolerance: 1.0,
                ..PackingConfig::default()
            };
            let layout = packer(config)
                .pack(&RadiusSet::new(values.clone()).unwrap(), &mut ChaChaRng::seed_from_u64(seed))
                .unwrap();

            prop_assert_eq!(layout.outcomes().len(), values.len());
            prop_assert!(layout.packing_fraction() <= config.target_fraction + 1e-12);
            if let Some(clearance) = layout.min_clearance() {
                prop_assert!(clearance >= -1e-9, "clearance {}", clearance);
            }
            assert_no_overlap(&layout);
        }
    }
}
