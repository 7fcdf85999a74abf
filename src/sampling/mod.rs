//! # Sampling
//!
//! Every function here takes the random source as an explicit `&mut R`
//! so a single seeded generator can be threaded through a whole run.

pub mod entropy;
pub mod selector;

pub use entropy::{EntropySampler, PowerLawBounds, sample_power_law};
pub use selector::{ObserverSelector, selection_weight};
