//! Batch evaluation: one batch of `attempts` trials reduced to a hit count.

use crate::sampler::count_pair_hits;
use crate::source::WordSource;
use crate::trials::TrialConfig;

/// Runs one batch of trials against `source` and returns the number of hits.
///
/// The source is taken by value; pass `&mut source` to keep using it
/// afterwards. Exactly [`TrialConfig::draws_per_batch`] words are drawn: one
/// per full word of trials, then a final masked word only if trials are left
/// over. The result is at most `trials.attempts()`.
#[inline]
pub fn evaluate_batch<S: WordSource>(mut source: S, trials: &TrialConfig) -> u32 {
    let mut hits = 0;
    for _ in 0..trials.full_draws() {
        hits += count_pair_hits(source.next_word());
    }
    if trials.leftover() != 0 {
        hits += count_pair_hits(source.next_word() & trials.leftover_mask());
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::Mwc32;
    use crate::sampler::count_masked_pair_hits;
    use crate::trials::TRIALS_PER_WORD;

    /// Wraps a source and counts how many words were drawn from it.
    struct Counting<S> {
        inner: S,
        draws: u32,
    }

    impl<S: WordSource> Counting<S> {
        fn new(inner: S) -> Self {
            Self { inner, draws: 0 }
        }
    }

    impl<S: WordSource> WordSource for Counting<S> {
        fn next_word(&mut self) -> u32 {
            self.draws += 1;
            self.inner.next_word()
        }
    }

    /// Yields the same word on every draw.
    struct Fixed(u32);

    impl WordSource for Fixed {
        fn next_word(&mut self) -> u32 {
            self.0
        }
    }

    fn seed() -> Mwc32 {
        Mwc32::from_seed_word(0xC0DE_15AF)
    }

    // -- Draw accounting --

    #[test]
    fn zero_attempts_draws_nothing_and_scores_zero() {
        let mut source = Counting::new(seed());
        assert_eq!(evaluate_batch(&mut source, &TrialConfig::new(0)), 0);
        assert_eq!(source.draws, 0);
    }

    #[test]
    fn exact_multiple_skips_the_masked_draw() {
        let mut source = Counting::new(seed());
        evaluate_batch(&mut source, &TrialConfig::new(48));
        assert_eq!(source.draws, 3);
    }

    #[test]
    fn default_attempts_draw_fifteen_words() {
        let mut source = Counting::new(seed());
        evaluate_batch(&mut source, &TrialConfig::new(231));
        assert_eq!(source.draws, 15);
    }

    #[test]
    fn borrowed_source_is_left_advanced() {
        let mut lent = seed();
        let mut reference = seed();
        evaluate_batch(&mut lent, &TrialConfig::new(231));
        for _ in 0..15 {
            reference.next_u32();
        }
        assert_eq!(lent, reference);
    }

    // -- Hit counting --

    #[test]
    fn all_ones_source_hits_every_attempt() {
        for attempts in [0, 1, 15, 16, 17, 231, 1000] {
            assert_eq!(
                evaluate_batch(Fixed(u32::MAX), &TrialConfig::new(attempts)),
                attempts,
                "attempts = {attempts}"
            );
        }
    }

    #[test]
    fn all_zero_source_never_hits() {
        assert_eq!(evaluate_batch(Fixed(0), &TrialConfig::new(231)), 0);
    }

    #[test]
    fn matches_a_hand_rolled_evaluation() {
        let trials = TrialConfig::new(231);
        let mut rng = seed();
        let mut expected = 0;
        for _ in 0..14 {
            expected += count_pair_hits(rng.next_u32());
        }
        expected += count_masked_pair_hits(rng.next_u32(), 7);
        assert_eq!(evaluate_batch(seed(), &trials), expected);
    }

    #[test]
    fn same_state_gives_same_batch() {
        let trials = TrialConfig::new(231);
        assert_eq!(evaluate_batch(seed(), &trials), evaluate_batch(seed(), &trials));
    }

    #[test]
    fn mean_hit_rate_is_close_to_a_quarter() {
        let trials = TrialConfig::new(231);
        let mut rng = seed();
        let batches = 2000;
        let total: u64 = (0..batches)
            .map(|_| evaluate_batch(rng.derive(), &trials) as u64)
            .sum();
        let mean = total as f64 / batches as f64;
        // Binomial(231, 0.25) has mean 57.75 and a batch-mean sd of ~0.15.
        assert!((mean - 57.75).abs() < 1.5, "mean hits per batch = {mean}");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn draws_equal_ceil_of_attempts_over_sixteen(
                u: u32,
                v: u32,
                attempts in 0_u32..2_000,
            ) {
                let mut source = Counting::new(Mwc32::new(u, v));
                evaluate_batch(&mut source, &TrialConfig::new(attempts));
                prop_assert_eq!(source.draws, attempts.div_ceil(TRIALS_PER_WORD));
            }

            #[test]
            fn hits_never_exceed_attempts(u: u32, v: u32, attempts in 0_u32..2_000) {
                let hits = evaluate_batch(Mwc32::new(u, v), &TrialConfig::new(attempts));
                prop_assert!(hits <= attempts, "{hits} hits from {attempts} attempts");
            }
        }
    }
}
