#![deny(unsafe_code)]
//! Core types for the max-hits Monte Carlo simulation.
//!
//! Provides the `Mwc32` multiply-with-carry generator, the `WordSource` trait,
//! the 2-bit pair sampler, `TrialConfig`, the batch evaluator,
//! `SimulationConfig`/`Policy`, and parameter helpers.

pub mod batch;
pub mod config;
pub mod error;
pub mod params;
pub mod prng;
pub mod sampler;
pub mod source;
pub mod trials;

pub use batch::evaluate_batch;
pub use config::{Policy, SimulationConfig};
pub use error::SimError;
pub use prng::Mwc32;
pub use sampler::count_pair_hits;
pub use source::WordSource;
pub use trials::TrialConfig;
