//! Ordered radius populations.

use crate::{Error, Result};

/// A population of radii, sorted largest first.
///
/// Produced once and never mutated afterwards. Largest-first order is what
/// the packer consumes. Deserializing goes through [`RadiusSet::new`], so a
/// serialized set is a plain list that is validated and sorted on load.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<f64>", into = "Vec<f64>")
)]
pub struct RadiusSet {
    radii: Vec<f64>,
}

impl RadiusSet {
    /// Build a set from arbitrary positive radii, sorting them descending.
    pub fn new(mut radii: Vec<f64>) -> Result<Self> {
        if let Some(&bad) = radii.iter().find(|r| !r.is_finite() || **r <= 0.0) {
            return Err(Error::InvalidRadius(bad));
        }
        radii.sort_by(|a, b| b.total_cmp(a));
        Ok(Self { radii })
    }

    /// An empty population.
    pub const fn empty() -> Self {
        Self { radii: Vec::new() }
    }

    /// Number of radii.
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    /// No radii at all.
    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    /// Radii in descending order.
    pub fn as_slice(&self) -> &[f64] {
        &self.radii
    }

    /// Iterate radii largest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.radii.iter().copied()
    }

    /// Largest radius, if any.
    pub fn max(&self) -> Option<f64> {
        self.radii.first().copied()
    }

    /// Smallest radius, if any.
    pub fn min(&self) -> Option<f64> {
        self.radii.last().copied()
    }

    /// Sample mean (0 for an empty set).
    pub fn mean(&self) -> f64 {
        if self.radii.is_empty() {
            return 0.0;
        }
        self.radii.iter().sum::<f64>() / self.radii.len() as f64
    }

    /// Population variance (0 for an empty set).
    pub fn variance(&self) -> f64 {
        if self.radii.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        self.radii.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / self.radii.len() as f64
    }

    /// Total cross-sectional area of all disks.
    pub fn total_area(&self) -> f64 {
        self.radii.iter().map(|r| std::f64::consts::PI * r * r).sum()
    }
}

impl<'a> IntoIterator for &'a RadiusSet {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.radii.iter()
    }
}

impl TryFrom<Vec<f64>> for RadiusSet {
    type Error = Error;

    fn try_from(radii: Vec<f64>) -> Result<Self> {
        Self::new(radii)
    }
}

impl From<RadiusSet> for Vec<f64> {
    fn from(set: RadiusSet) -> Self {
        set.radii
    }
}
