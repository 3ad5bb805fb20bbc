//! Sequential policy: one running generator, batches evaluated in order.

use max_hits_core::{evaluate_batch, Mwc32, TrialConfig};

/// Infinite stream of batch hit counts from one running generator.
///
/// Before every batch a fresh state is derived from the running one (two
/// draws), so consecutive batches do not continue each other's stream.
#[derive(Debug, Clone)]
pub struct Batches {
    state: Mwc32,
    trials: TrialConfig,
}

impl Batches {
    /// Starts a stream at `state`.
    pub fn new(state: Mwc32, trials: TrialConfig) -> Self {
        Self { state, trials }
    }

    /// Derives the next batch state and evaluates it.
    #[inline]
    pub fn next_batch(&mut self) -> u32 {
        evaluate_batch(self.state.derive(), &self.trials)
    }

    /// Current running generator state.
    pub fn state(&self) -> Mwc32 {
        self.state
    }
}

impl Iterator for Batches {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        Some(self.next_batch())
    }
}

/// Runs `rounds` batches from `state` and returns the highest hit count.
///
/// Zero rounds yield 0.
pub fn run_sequential(state: Mwc32, trials: &TrialConfig, rounds: u64) -> u32 {
    let mut batches = Batches::new(state, *trials);
    let mut max_hits = 0;
    for _ in 0..rounds {
        max_hits = max_hits.max(batches.next_batch());
    }
    max_hits
}
