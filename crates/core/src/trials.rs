//! Trial configuration: how many 1/4 trials a batch runs and how they map
//! onto generator words.

use serde::{Deserialize, Serialize};

/// Bits in one generated word.
pub const WORD_BITS: u32 = u32::BITS;
/// Bits consumed by one trial.
pub const PAIR_BITS: u32 = 2;
/// Independent trials carried by one word.
pub const TRIALS_PER_WORD: u32 = WORD_BITS / PAIR_BITS;

const _: () = assert!(WORD_BITS % PAIR_BITS == 0, "pairs must tile the word");

/// Immutable per-batch trial layout derived from the attempt count.
///
/// `attempts` trials are served by `full_draws` whole words plus, when
/// `leftover` is non-zero, one more word masked to its low `2 * leftover`
/// bits. All fields are fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TrialsRepr", into = "TrialsRepr")]
pub struct TrialConfig {
    attempts: u32,
    full_draws: u32,
    leftover: u32,
    leftover_mask: u32,
}

/// Only `attempts` is persisted; everything else is re-derived on load.
#[derive(Serialize, Deserialize)]
struct TrialsRepr {
    attempts: u32,
}

impl From<TrialsRepr> for TrialConfig {
    fn from(repr: TrialsRepr) -> Self {
        Self::new(repr.attempts)
    }
}

impl From<TrialConfig> for TrialsRepr {
    fn from(config: TrialConfig) -> Self {
        Self {
            attempts: config.attempts,
        }
    }
}

impl TrialConfig {
    /// Derives the word layout for `attempts` trials per batch.
    pub const fn new(attempts: u32) -> Self {
        let leftover = attempts % TRIALS_PER_WORD;
        Self {
            attempts,
            full_draws: attempts / TRIALS_PER_WORD,
            leftover,
            leftover_mask: crate::sampler::low_pairs_mask(leftover),
        }
    }

    /// Trials per batch.
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Whole words drawn per batch.
    pub const fn full_draws(&self) -> u32 {
        self.full_draws
    }

    /// Trials served by the final, masked word (0 means no such word).
    pub const fn leftover(&self) -> u32 {
        self.leftover
    }

    /// Mask applied to the final word.
    pub const fn leftover_mask(&self) -> u32 {
        self.leftover_mask
    }

    /// Generator calls per batch, `ceil(attempts / 16)`.
    pub const fn draws_per_batch(&self) -> u32 {
        self.full_draws + (self.leftover != 0) as u32
    }
}
