//! Fiber Radius Sampling
//!
//! Draws the population of axon radii that the packer will place. Radii come
//! from a user-selected distribution (gamma, log-normal, normal or uniform),
//! are scaled to physical units, and are returned largest first.
//!
//! Sampling is reproducible: the only source of randomness is the generator
//! the caller passes in.
//!
//! ```
//! use myelin_sampling::{DistributionSpec, RadiusSampler};
//! use rand::SeedableRng;
//! use rand_chacha::ChaChaRng;
//!
//! let sampler = RadiusSampler::new(DistributionSpec::gamma(3.0, 1.0).with_unit_scale(1e-6)).unwrap();
//! let radii = sampler.sample(10, &mut ChaChaRng::seed_from_u64(42)).unwrap();
//! assert_eq!(radii.len(), 10);
//! ```

mod distribution;
mod error;
mod radius_set;
mod sampler;

pub use distribution::{DistributionKind, DistributionSpec};
pub use error::{Error, Result};
pub use radius_set::RadiusSet;
pub use sampler::{RadiusSampler, DEFAULT_MAX_DRAWS_PER_RADIUS};
