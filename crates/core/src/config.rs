//! Reproducible description of a simulation run.
//!
//! A [`SimulationConfig`] captures everything the driver needs: the generator
//! seed, the trials per batch, the number of batches, and the execution
//! policy. Two equal configs with the same worker count produce the same
//! maximum.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SimError;
use crate::params::{param_string, param_u32, param_u64, param_usize};
use crate::prng::Mwc32;
use crate::trials::TrialConfig;

/// Seed word used when none is given; `v` is its complement.
pub const DEFAULT_SEED_WORD: u32 = 0xC0DE_15AF;
/// Trials per batch.
pub const DEFAULT_ATTEMPTS: u32 = 231;
/// Batches per run.
pub const DEFAULT_ROUNDS: u64 = 1_000_000_000;

/// All available policy names.
const POLICY_NAMES: &[&str] = &["sequential", "parallel"];

/// Worker count matching the machine's available parallelism (at least 1).
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// How batches are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Policy {
    /// One generator, every batch in order on the calling thread.
    Sequential,
    /// A fixed pool of workers, each with its own derived generator and a
    /// contiguous share of the batches.
    Parallel { workers: usize },
}

impl Policy {
    /// Constructs a policy by name. `workers` is ignored for `sequential`.
    ///
    /// Returns `SimError::UnknownPolicy` if the name is not recognized.
    pub fn from_name(name: &str, workers: usize) -> Result<Self, SimError> {
        match name {
            "sequential" => Ok(Policy::Sequential),
            "parallel" => Ok(Policy::Parallel { workers }),
            _ => Err(SimError::UnknownPolicy(name.to_string())),
        }
    }

    /// Returns a slice of all recognized policy names.
    pub fn list_names() -> &'static [&'static str] {
        POLICY_NAMES
    }

    /// The name accepted by [`Policy::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Sequential => "sequential",
            Policy::Parallel { .. } => "parallel",
        }
    }

    /// Worker count as requested (1 for sequential runs).
    ///
    /// This is not clamped. The driver caps it at [`available_workers`]
    /// when the run starts, and the report carries the clamped count.
    pub fn requested_workers(&self) -> usize {
        match self {
            Policy::Sequential => 1,
            Policy::Parallel { workers } => *workers,
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy::Parallel {
            workers: available_workers(),
        }
    }
}

/// Immutable configuration of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub seed: Mwc32,
    pub trials: TrialConfig,
    pub rounds: u64,
    pub policy: Policy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: Mwc32::from_seed_word(DEFAULT_SEED_WORD),
            trials: TrialConfig::new(DEFAULT_ATTEMPTS),
            rounds: DEFAULT_ROUNDS,
            policy: Policy::default(),
        }
    }
}

impl SimulationConfig {
    /// Creates a config from explicit parts.
    pub fn new(seed: Mwc32, attempts: u32, rounds: u64, policy: Policy) -> Self {
        Self {
            seed,
            trials: TrialConfig::new(attempts),
            rounds,
            policy,
        }
    }

    /// Builds a config from a flat JSON object, falling back to defaults.
    ///
    /// Recognized keys: `seed_u`, `seed_v` (integers or `0x` hex strings;
    /// `seed_v` defaults to the complement of `seed_u`), `attempts`, `rounds`,
    /// `policy`, and `workers`. The result is validated.
    pub fn from_json(params: &Value) -> Result<Self, SimError> {
        if !params.is_object() {
            return Err(SimError::ParamTypeMismatch {
                name: "params".into(),
                expected: "object".into(),
                got: json_type_name(params).into(),
            });
        }

        let defaults = Self::default();
        let u = param_u32(params, "seed_u", defaults.seed.state().0);
        let v = param_u32(params, "seed_v", !u);

        let policy = Policy::from_name(
            &param_string(params, "policy", defaults.policy.name()),
            param_usize(params, "workers", defaults.policy.requested_workers()),
        )?;

        let config = Self::new(
            Mwc32::new(u, v),
            param_u32(params, "attempts", defaults.trials.attempts()),
            param_u64(params, "rounds", defaults.rounds),
            policy,
        );
        config.validate()?;
        Ok(config)
    }

    /// Rejects seeds with a stuck lane and parallel runs without workers.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.seed.is_degenerate() {
            let (u, v) = self.seed.state();
            return Err(SimError::DegenerateSeed { u, v });
        }
        if let Policy::Parallel { workers: 0 } = self.policy {
            return Err(SimError::InvalidWorkerCount(0));
        }
        Ok(())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
