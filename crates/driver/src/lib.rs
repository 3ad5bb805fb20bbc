#![deny(unsafe_code)]
//! Simulation drivers: run a validated [`SimulationConfig`] under its policy.
//!
//! This crate sits between `max-hits-core` (generator, sampler, batch
//! evaluator) and the CLI. The sequential and parallel policies live in their
//! own modules; [`Simulation`] dispatches on [`Policy`] and times the run.

pub mod parallel;
pub mod sequential;

use std::time::Instant;

use max_hits_core::{Policy, SimError, SimulationConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

pub use parallel::{derive_worker_state, partition_rounds, run_parallel};
pub use sequential::{run_sequential, Batches};

/// Outcome of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub policy: String,
    /// Workers that actually ran (after clamping to the hardware).
    pub workers: usize,
    pub rounds: u64,
    pub attempts: u32,
    pub seed_u: u32,
    pub seed_v: u32,
    pub max_hits: u32,
    pub elapsed_ms: u64,
}

/// A validated simulation ready to run.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    /// Wraps `config` after validating it.
    pub fn new(config: SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this simulation runs.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Worker count the run will use.
    pub fn workers(&self) -> usize {
        match self.config.policy {
            Policy::Sequential => 1,
            Policy::Parallel { workers } => parallel::effective_workers(workers),
        }
    }

    /// Runs every batch and returns the report.
    pub fn run(&self) -> SimulationReport {
        let SimulationConfig {
            seed,
            trials,
            rounds,
            policy,
        } = self.config;
        let workers = self.workers();
        let (seed_u, seed_v) = seed.state();

        info!(
            policy = policy.name(),
            workers,
            rounds,
            attempts = trials.attempts(),
            seed_u,
            seed_v,
            "starting simulation"
        );

        let started = Instant::now();
        let max_hits = match policy {
            Policy::Sequential => run_sequential(seed, &trials, rounds),
            Policy::Parallel { .. } => run_parallel(seed, &trials, rounds, workers),
        };
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(max_hits, elapsed_ms, "simulation finished");

        SimulationReport {
            policy: policy.name().to_string(),
            workers,
            rounds,
            attempts: trials.attempts(),
            seed_u,
            seed_v,
            max_hits,
            elapsed_ms,
        }
    }
}
