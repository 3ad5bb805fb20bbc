//! Parallel policy: a fixed pool of workers, each with its own stream.
//!
//! Every worker gets a contiguous share of the batch range and a generator
//! state derived from the shared seed by its index. Workers never touch each
//! other's state; their local maxima are collected once all of them finish and
//! folded with `max`, which is associative and commutative, so scheduling order
//! cannot change the result for a given worker count.

use std::ops::Range;

use max_hits_core::config::available_workers;
use max_hits_core::{Mwc32, TrialConfig};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, warn};

use crate::sequential::run_sequential;

/// Derives the starting state of worker `worker_index` from the shared seed.
///
/// The seed is replaced by its own derivation `2 * worker_index` times, so
/// worker 0 starts on the seed itself. This only offsets each worker into the
/// same generator family; it does not prove the streams never overlap.
pub fn derive_worker_state(seed: Mwc32, worker_index: usize) -> Mwc32 {
    (0..2 * worker_index).fold(seed, |mut state, _| state.derive())
}

/// Splits `0..rounds` into `workers` contiguous shares.
///
/// Shares differ in length by at most one; the first `rounds % workers`
/// shares are the longer ones. `workers == 0` is treated as 1.
pub fn partition_rounds(rounds: u64, workers: usize) -> Vec<Range<u64>> {
    let workers = workers.max(1) as u64;
    let base = rounds / workers;
    let extra = rounds % workers;
    let mut start = 0;
    (0..workers)
        .map(|index| {
            let len = base + u64::from(index < extra);
            let share = start..start + len;
            start += len;
            share
        })
        .collect()
}

/// Clamps a requested worker count to `[1, available parallelism]`.
pub fn effective_workers(requested: usize) -> usize {
    requested.clamp(1, available_workers())
}

/// Runs one worker's share on the calling thread and returns its maximum.
pub fn worker_max(
    seed: Mwc32,
    trials: &TrialConfig,
    worker_index: usize,
    share: Range<u64>,
) -> u32 {
    let state = derive_worker_state(seed, worker_index);
    let rounds = share.end - share.start;
    let local_max = run_sequential(state, trials, rounds);
    debug!(
        worker = worker_index,
        first_round = share.start,
        rounds,
        u = state.state().0,
        v = state.state().1,
        local_max,
        "worker finished"
    );
    local_max
}

/// Runs `rounds` batches across up to `workers` threads and returns the
/// highest hit count.
///
/// `workers` is clamped with [`effective_workers`]. For a fixed effective
/// worker count the result is deterministic.
pub fn run_parallel(seed: Mwc32, trials: &TrialConfig, rounds: u64, workers: usize) -> u32 {
    let workers = effective_workers(workers);
    let shares = partition_rounds(rounds, workers);

    let maxima = match ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool.install(|| run_shares(seed, trials, &shares)),
        Err(err) => {
            warn!(%err, workers, "could not build worker pool, using the global pool");
            run_shares(seed, trials, &shares)
        }
    };

    maxima.into_iter().fold(0, u32::max)
}

fn run_shares(seed: Mwc32, trials: &TrialConfig, shares: &[Range<u64>]) -> Vec<u32> {
    shares
        .par_iter()
        .enumerate()
        .map(|(index, share)| worker_max(seed, trials, index, share.clone()))
        .collect()
}
