//! Radius distribution specifications.
//!
//! A [`DistributionSpec`] names a family, its parameters in raw (unscaled)
//! units, a scale factor to physical units and the accepted radius range.

use std::collections::BTreeMap;

use rand::Rng;
use rand_distr::{Distribution, Gamma, LogNormal, Normal, Uniform};

use crate::{Error, Result};

/// Supported distribution families with their parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "lowercase")
)]
pub enum DistributionKind {
    /// Gamma distribution, mean `shape × scale`.
    Gamma { shape: f64, scale: f64 },
    /// Log-normal distribution of `exp(N(mu, sigma²))`.
    LogNormal { mu: f64, sigma: f64 },
    /// Normal distribution; non-positive draws are rejected.
    Normal { mean: f64, std_dev: f64 },
    /// Uniform distribution on `[low, high)`.
    Uniform { low: f64, high: f64 },
}

impl DistributionKind {
    /// Short family name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gamma { .. } => "gamma",
            Self::LogNormal { .. } => "lognormal",
            Self::Normal { .. } => "normal",
            Self::Uniform { .. } => "uniform",
        }
    }

    /// Mean of the untruncated distribution, in raw units.
    pub fn mean(&self) -> f64 {
        match *self {
            Self::Gamma { shape, scale } => shape * scale,
            Self::LogNormal { mu, sigma } => (mu + sigma * sigma / 2.0).exp(),
            Self::Normal { mean, .. } => mean,
            Self::Uniform { low, high } => (low + high) / 2.0,
        }
    }

    /// Variance of the untruncated distribution, in raw units.
    pub fn variance(&self) -> f64 {
        match *self {
            Self::Gamma { shape, scale } => shape * scale * scale,
            Self::LogNormal { mu, sigma } => {
                let s2 = sigma * sigma;
                (s2.exp() - 1.0) * (2.0 * mu + s2).exp()
            }
            Self::Normal { std_dev, .. } => std_dev * std_dev,
            Self::Uniform { low, high } => (high - low).powi(2) / 12.0,
        }
    }

    fn parameters(&self) -> [f64; 2] {
        match *self {
            Self::Gamma { shape, scale } => [shape, scale],
            Self::LogNormal { mu, sigma } => [mu, sigma],
            Self::Normal { mean, std_dev } => [mean, std_dev],
            Self::Uniform { low, high } => [low, high],
        }
    }

    fn validate(&self) -> Result<()> {
        if self.parameters().iter().any(|p| !p.is_finite()) {
            return Err(invalid(format!("{} parameters must be finite", self.name())));
        }
        match *self {
            Self::Gamma { shape, scale } if shape <= 0.0 || scale <= 0.0 => Err(invalid(format!(
                "gamma needs shape > 0 and scale > 0, got shape={shape} scale={scale}"
            ))),
            Self::LogNormal { sigma, .. } if sigma < 0.0 => {
                Err(invalid(format!("lognormal needs sigma >= 0, got {sigma}")))
            }
            Self::Normal { mean, std_dev } if mean <= 0.0 || std_dev < 0.0 => Err(invalid(format!(
                "normal needs mean > 0 and std_dev >= 0, got mean={mean} std_dev={std_dev}"
            ))),
            Self::Uniform { low, high } if high <= low || high <= 0.0 => Err(invalid(format!(
                "uniform needs low < high and high > 0, got [{low}, {high})"
            ))),
            _ => Ok(()),
        }
    }

    /// Build the concrete sampler for this family.
    fn sampler(&self) -> Result<RawSampler> {
        self.validate()?;
        let sampler = match *self {
            Self::Gamma { shape, scale } => RawSampler::Gamma(
                Gamma::new(shape, scale).map_err(|e| invalid(format!("gamma: {e}")))?,
            ),
            Self::LogNormal { mu, sigma } => RawSampler::LogNormal(
                LogNormal::new(mu, sigma).map_err(|e| invalid(format!("lognormal: {e}")))?,
            ),
            Self::Normal { mean, std_dev } => RawSampler::Normal(
                Normal::new(mean, std_dev).map_err(|e| invalid(format!("normal: {e}")))?,
            ),
            Self::Uniform { low, high } => RawSampler::Uniform(Uniform::new(low, high)),
        };
        Ok(sampler)
    }
}

/// Concrete `rand_distr` sampler behind a [`DistributionKind`].
#[derive(Debug, Clone)]
pub(crate) enum RawSampler {
    Gamma(Gamma<f64>),
    LogNormal(LogNormal<f64>),
    Normal(Normal<f64>),
    Uniform(Uniform<f64>),
}

impl Distribution<f64> for RawSampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Gamma(d) => d.sample(rng),
            Self::LogNormal(d) => d.sample(rng),
            Self::Normal(d) => d.sample(rng),
            Self::Uniform(d) => d.sample(rng),
        }
    }
}

/// Immutable description of a radius population.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistributionSpec {
    /// Family and parameters
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: DistributionKind,
    /// Smallest accepted radius, physical units
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_radius: f64,
    /// Largest accepted radius, physical units (unbounded when `None`)
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_radius: Option<f64>,
    /// Factor converting raw draws to physical units
    #[cfg_attr(feature = "serde", serde(default = "default_unit_scale"))]
    pub unit_scale: f64,
}

#[cfg(feature = "serde")]
fn default_unit_scale() -> f64 {
    1.0
}

impl DistributionSpec {
    /// Spec with no bounds beyond positivity and unit scale 1.
    pub const fn new(kind: DistributionKind) -> Self {
        Self {
            kind,
            min_radius: 0.0,
            max_radius: None,
            unit_scale: 1.0,
        }
    }

    /// Gamma-distributed radii.
    pub const fn gamma(shape: f64, scale: f64) -> Self {
        Self::new(DistributionKind::Gamma { shape, scale })
    }

    /// Log-normally distributed radii.
    pub const fn lognormal(mu: f64, sigma: f64) -> Self {
        Self::new(DistributionKind::LogNormal { mu, sigma })
    }

    /// Normally distributed radii.
    pub const fn normal(mean: f64, std_dev: f64) -> Self {
        Self::new(DistributionKind::Normal { mean, std_dev })
    }

    /// Uniformly distributed radii.
    pub const fn uniform(low: f64, high: f64) -> Self {
        Self::new(DistributionKind::Uniform { low, high })
    }

    /// Restrict accepted radii to `[min, max]`.
    pub const fn with_bounds(mut self, min_radius: f64, max_radius: Option<f64>) -> Self {
        self.min_radius = min_radius;
        self.max_radius = max_radius;
        self
    }

    /// Scale raw draws into physical units.
    pub const fn with_unit_scale(mut self, unit_scale: f64) -> Self {
        self.unit_scale = unit_scale;
        self
    }

    /// Build a spec from a family name and a name→value parameter map.
    ///
    /// Recognized keys: `shape`, `scale` (gamma); `mu`, `sigma`
    /// (lognormal); `mean` or `loc`, `std_dev` (normal); `low`, `high`
    /// (uniform). Optional for all families: `min`, `max`, `unit_scale`.
    pub fn from_parameters(name: &str, params: &BTreeMap<String, f64>) -> Result<Self> {
        let get = |key: &str| {
            params
                .get(key)
                .copied()
                .ok_or_else(|| invalid(format!("{name} is missing parameter `{key}`")))
        };

        let kind = match name.to_ascii_lowercase().as_str() {
            "gamma" => DistributionKind::Gamma {
                shape: get("shape")?,
                scale: get("scale")?,
            },
            "lognormal" => DistributionKind::LogNormal {
                mu: get("mu")?,
                sigma: get("sigma")?,
            },
            "normal" => DistributionKind::Normal {
                mean: get("mean").or_else(|_| get("loc"))?,
                std_dev: get("std_dev")?,
            },
            "uniform" => DistributionKind::Uniform {
                low: get("low")?,
                high: get("high")?,
            },
            other => return Err(invalid(format!("unknown distribution `{other}`"))),
        };

        let spec = Self {
            kind,
            min_radius: params.get("min").copied().unwrap_or(0.0),
            max_radius: params.get("max").copied(),
            unit_scale: params.get("unit_scale").copied().unwrap_or(1.0),
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check parameters and bounds without drawing anything.
    pub fn validate(&self) -> Result<()> {
        self.kind.validate()?;

        if !self.unit_scale.is_finite() || self.unit_scale <= 0.0 {
            return Err(invalid(format!("unit_scale must be positive, got {}", self.unit_scale)));
        }
        if !self.min_radius.is_finite() || self.min_radius < 0.0 {
            return Err(invalid(format!("min_radius must be >= 0, got {}", self.min_radius)));
        }
        if let Some(max) = self.max_radius {
            if max.is_nan() || max <= self.min_radius {
                return Err(invalid(format!(
                    "max_radius {max} must exceed min_radius {}",
                    self.min_radius
                )));
            }
        }
        if let DistributionKind::Uniform { low, high } = self.kind {
            let (low, high) = (low * self.unit_scale, high * self.unit_scale);
            let max = self.max_radius.unwrap_or(f64::INFINITY);
            if high <= self.min_radius || low > max {
                return Err(invalid(format!(
                    "uniform range [{low}, {high}) does not intersect [{}, {max}]",
                    self.min_radius
                )));
            }
        }
        Ok(())
    }

    /// Whether a scaled draw is inside the accepted range.
    #[inline]
    pub fn accepts(&self, radius: f64) -> bool {
        radius.is_finite()
            && radius > 0.0
            && radius >= self.min_radius
            && self.max_radius.map_or(true, |max| radius <= max)
    }

    /// Mean of the untruncated distribution in physical units.
    pub fn theoretical_mean(&self) -> f64 {
        self.kind.mean() * self.unit_scale
    }

    /// Variance of the untruncated distribution in physical units.
    pub fn theoretical_variance(&self) -> f64 {
        self.kind.variance() * self.unit_scale * self.unit_scale
    }

    pub(crate) fn sampler(&self) -> Result<RawSampler> {
        self.validate()?;
        self.kind.sampler()
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidDistribution(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn gamma_moments() {
        let spec = DistributionSpec::gamma(2.0, 1.5);
        assert_eq!(spec.theoretical_mean(), 3.0);
        assert_eq!(spec.theoretical_variance(), 4.5);
    }

    #[test]
    fn unit_scale_applies_to_moments() {
        let spec = DistributionSpec::uniform(1.0, 3.0).with_unit_scale(1e-6);
        assert!((spec.theoretical_mean() - 2e-6).abs() < 1e-18);
        assert!((spec.theoretical_variance() - (4.0 / 12.0) * 1e-12).abs() < 1e-24);
    }

    #[test]
    fn rejects_non_positive_gamma() {
        assert!(matches!(
            DistributionSpec::gamma(0.0, 1.0).validate(),
            Err(Error::InvalidDistribution(_))
        ));
        assert!(DistributionSpec::gamma(2.0, -1.0).validate().is_err());
    }

    #[test]
    fn rejects_normal_centered_at_zero() {
        assert!(DistributionSpec::normal(0.0, 1.0).validate().is_err());
        assert!(DistributionSpec::normal(1.0, -0.1).validate().is_err());
        assert!(DistributionSpec::normal(1.0, 0.1).validate().is_ok());
    }

    #[test]
    fn rejects_inverted_or_negative_uniform() {
        assert!(DistributionSpec::uniform(2.0, 1.0).validate().is_err());
        assert!(DistributionSpec::uniform(-2.0, -1.0).validate().is_err());
        assert!(DistributionSpec::uniform(-1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn rejects_uniform_outside_bounds() {
        let spec = DistributionSpec::uniform(1.0, 2.0).with_bounds(3.0, None);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn rejects_bad_bounds_and_scale() {
        let spec = DistributionSpec::gamma(2.0, 1.0);
        assert!(spec.with_bounds(-1.0, None).validate().is_err());
        assert!(spec.with_bounds(1.0, Some(1.0)).validate().is_err());
        assert!(spec.with_unit_scale(0.0).validate().is_err());
        assert!(DistributionSpec::lognormal(f64::NAN, 1.0).validate().is_err());
    }

    #[test]
    fn accepts_respects_bounds() {
        let spec = DistributionSpec::gamma(2.0, 1.0).with_bounds(0.5, Some(3.0));
        assert!(spec.accepts(0.5));
        assert!(spec.accepts(3.0));
        assert!(!spec.accepts(0.49));
        assert!(!spec.accepts(3.01));
        assert!(!DistributionSpec::gamma(2.0, 1.0).accepts(0.0));
        assert!(!DistributionSpec::gamma(2.0, 1.0).accepts(f64::NAN));
    }

    #[test]
    fn from_parameters_gamma() {
        let spec =
            DistributionSpec::from_parameters("gamma", &params(&[("shape", 3.0), ("scale", 1e-6)]))
                .unwrap();
        assert_eq!(spec.kind, DistributionKind::Gamma { shape: 3.0, scale: 1e-6 });
        assert_eq!(spec.min_radius, 0.0);
        assert_eq!(spec.max_radius, None);
    }

    #[test]
    fn from_parameters_accepts_loc_alias_and_bounds() {
        let spec = DistributionSpec::from_parameters(
            "Normal",
            &params(&[("loc", 1.0), ("std_dev", 0.2), ("min", 0.1), ("max", 2.0)]),
        )
        .unwrap();
        assert_eq!(spec.kind, DistributionKind::Normal { mean: 1.0, std_dev: 0.2 });
        assert_eq!(spec.min_radius, 0.1);
        assert_eq!(spec.max_radius, Some(2.0));
    }

    #[test]
    fn from_parameters_reports_missing_and_unknown() {
        let missing = DistributionSpec::from_parameters("gamma", &params(&[("shape", 2.0)]));
        assert!(matches!(missing, Err(Error::InvalidDistribution(msg)) if msg.contains("scale")));

        let unknown = DistributionSpec::from_parameters("cauchy", &params(&[]));
        assert!(unknown.is_err());
    }

    #[test]
    fn lognormal_mean_formula() {
        let spec = DistributionSpec::lognormal(0.0, 0.0);
        assert_eq!(spec.theoretical_mean(), 1.0);
        assert_eq!(spec.theoretical_variance(), 0.0);
    }
}
