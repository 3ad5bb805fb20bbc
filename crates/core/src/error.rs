//! Error types for max-hits configuration.
//!
//! The simulation itself cannot fail; these errors only come out of building
//! or validating a [`SimulationConfig`](crate::SimulationConfig).

use thiserror::Error;

/// Errors produced while assembling a simulation configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    /// A generator lane is zero or sits on its fixed point.
    #[error("degenerate seed (u={u:#010x}, v={v:#010x}): a lane would repeat forever")]
    DegenerateSeed { u: u32, v: u32 },

    /// A parallel run was asked to use zero workers.
    #[error("invalid worker count {0}: at least one worker is required")]
    InvalidWorkerCount(usize),

    /// A policy name did not match any known driver.
    #[error("unknown policy: {0}")]
    UnknownPolicy(String),

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },
}
