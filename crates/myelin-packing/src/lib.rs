//! Periodic Disk Packing
//!
//! Places fiber cross-sections into a square domain with periodic
//! boundaries. Radii are processed largest first; each one is tried at
//! uniformly random positions and accepted iff it clears every previously
//! accepted disk by the configured margin under the minimum-image convention.
//!
//! # Bounded Search
//!
//! Dense periodic packing has no guaranteed solution, so the search is
//! bounded and every radius ends with a typed [`PlacementOutcome`]:
//! - `Accepted` at full radius
//! - `Shrunk` after fitting to the remaining density budget or after radius
//!   decay rounds
//! - `Dropped` when attempts and shrink rounds are exhausted
//! - `Skipped` when the remaining density budget only fits a disk smaller
//!   than the shrink rounds could reach
//!
//! Only a dropped fraction above the configured tolerance is an error.

mod config;
mod error;
mod layout;
mod packer;

pub use config::{
    PackingConfig, DEFAULT_MAX_ATTEMPTS_PER_DISK, DEFAULT_MAX_SHRINK_ROUNDS, DEFAULT_SHRINK_FACTOR,
};
pub use error::{Error, Result};
pub use layout::{PackedLayout, PlacementOutcome};
pub use packer::PeriodicDiskPacker;
