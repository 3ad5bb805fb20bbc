//! Multiplexed 1/4-probability trials packed into a single 32-bit word.
//!
//! A word is read as 16 adjacent 2-bit pairs. With uniformly random bits each
//! pair is `11` with probability 1/4, so one generator call settles 16
//! independent trials. `word & (word << 1)` leaves a set bit at the high
//! position of every `11` pair (and at some straddling positions), and the
//! alternating mask keeps only the in-pair positions.

use crate::trials::{PAIR_BITS, TRIALS_PER_WORD};

/// Selects the high bit of every 2-bit pair.
pub const PAIR_HIGH_BITS: u32 = 0xAAAA_AAAA;

/// Counts the pairs in `word` whose two bits are both set.
///
/// The result is always in `[0, 16]`.
#[inline]
pub const fn count_pair_hits(word: u32) -> u32 {
    (word & (word << 1) & PAIR_HIGH_BITS).count_ones()
}

/// Mask that keeps the lowest `pairs` pairs of a word.
///
/// Bits above the mask cannot contribute to [`count_pair_hits`], which is how
/// a batch evaluates fewer than 16 trials from its final draw. `pairs >= 16`
/// keeps the whole word.
#[inline]
pub const fn low_pairs_mask(pairs: u32) -> u32 {
    if pairs >= TRIALS_PER_WORD {
        u32::MAX
    } else {
        (1 << (pairs * PAIR_BITS)) - 1
    }
}

/// Counts hits among the lowest `pairs` pairs of `word` only.
#[inline]
pub const fn count_masked_pair_hits(word: u32, pairs: u32) -> u32 {
    count_pair_hits(word & low_pairs_mask(pairs))
}
