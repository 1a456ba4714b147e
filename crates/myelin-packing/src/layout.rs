//! Packing results.

use myelin_topology::{Disk, PeriodicDomain};

/// What happened to one radius of the input population.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementOutcome {
    /// Placed at full radius.
    Accepted {
        /// Index into [`PackedLayout::disks`]
        disk_index: usize,
        attempts: u32,
    },
    /// Placed at a reduced radius: fitted to the remaining density budget,
    /// then shrunk `rounds` more times by the search.
    Shrunk {
        disk_index: usize,
        original_radius: f64,
        rounds: u32,
        attempts: u32,
    },
    /// No clear position found within the attempt and shrink budget.
    Dropped { original_radius: f64, attempts: u32 },
    /// Not attempted: fitting it into the remaining density budget would
    /// shrink it past the shrink-round floor.
    Skipped { radius: f64 },
}

impl PlacementOutcome {
    /// Index of the placed disk, if it was placed.
    pub fn disk_index(&self) -> Option<usize> {
        match *self {
            Self::Accepted { disk_index, .. } | Self::Shrunk { disk_index, .. } => Some(disk_index),
            Self::Dropped { .. } | Self::Skipped { .. } => None,
        }
    }

    /// Random positions tried for this radius.
    pub fn attempts(&self) -> u32 {
        match *self {
            Self::Accepted { attempts, .. }
            | Self::Shrunk { attempts, .. }
            | Self::Dropped { attempts, .. } => attempts,
            Self::Skipped { .. } => 0,
        }
    }
}

/// Accepted disks plus bookkeeping about the search.
///
/// Built once by the packer and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedLayout {
    domain: PeriodicDomain,
    margin: f64,
    disks: Vec<Disk>,
    outcomes: Vec<PlacementOutcome>,
}

impl PackedLayout {
    pub(crate) fn new(
        domain: PeriodicDomain,
        margin: f64,
        disks: Vec<Disk>,
        outcomes: Vec<PlacementOutcome>,
    ) -> Self {
        Self {
            domain,
            margin,
            disks,
            outcomes,
        }
    }

    /// The periodic domain the disks live in.
    pub fn domain(&self) -> &PeriodicDomain {
        &self.domain
    }

    /// Clearance margin enforced between disks.
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Accepted disks in placement order.
    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    /// One outcome per input radius, in input order.
    pub fn outcomes(&self) -> &[PlacementOutcome] {
        &self.outcomes
    }

    /// Sum of disk areas divided by `L²`.
    pub fn packing_fraction(&self) -> f64 {
        let area: f64 = self.disks.iter().map(Disk::area).sum();
        area / self.domain.area()
    }

    /// Radii that could not be placed.
    pub fn dropped_count(&self) -> usize {
        self.count(|o| matches!(o, PlacementOutcome::Dropped { .. }))
    }

    /// Radii left out by the density target.
    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, PlacementOutcome::Skipped { .. }))
    }

    /// Placed disks whose radius was reduced.
    pub fn shrunk_count(&self) -> usize {
        self.count(|o| matches!(o, PlacementOutcome::Shrunk { .. }))
    }

    /// Random positions tried over the whole search.
    pub fn total_attempts(&self) -> u64 {
        self.outcomes.iter().map(|o| u64::from(o.attempts())).sum()
    }

    /// Smallest periodic gap between two disk boundaries, minus the margin.
    ///
    /// Non-negative for every layout the packer produces; `None` with fewer
    /// than two disks.
    pub fn min_clearance(&self) -> Option<f64> {
        let mut best: Option<f64> = None;
        for (i, a) in self.disks.iter().enumerate() {
            for b in &self.disks[i + 1..] {
                let gap = self.domain.periodic_distance(a.center, b.center)
                    - a.radius
                    - b.radius
                    - self.margin;
                best = Some(best.map_or(gap, |g| g.min(gap)));
            }
        }
        best
    }

    fn count(&self, predicate: impl Fn(&PlacementOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}
