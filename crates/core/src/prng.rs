//! Deterministic multiply-with-carry PRNG over a pair of 32-bit lanes.
//!
//! Each lane is a 16-bit multiply-with-carry generator: the low half of the
//! lane is the value, the high half is the carry. The output word joins the
//! low half of the `v` lane (upper 16 bits) with the low half of the `u` lane
//! (lower 16 bits). All arithmetic wraps at 32 bits, which is part of the
//! algorithm rather than an overflow condition.

use serde::{Deserialize, Serialize};

use crate::source::WordSource;

/// Bits per lane half.
const HALF_BITS: u32 = 16;
/// Mask selecting the low half of a lane.
const LOW_HALF: u32 = (1 << HALF_BITS) - 1;
/// Multiplier of the `v` lane (supplies the high half of each output word).
const V_MULTIPLIER: u32 = 36969;
/// Multiplier of the `u` lane (supplies the low half of each output word).
const U_MULTIPLIER: u32 = 18000;
/// Modulus of the `u` lane, `18000 * 2^16 - 1`. It is also the lane's
/// non-zero fixed point.
const U_MODULUS: u32 = ((U_MULTIPLIER - 1) << HALF_BITS) | LOW_HALF;
/// Modulus of the `v` lane, `36969 * 2^16 - 1`.
const V_MODULUS: u32 = ((V_MULTIPLIER - 1) << HALF_BITS) | LOW_HALF;

/// Two-lane multiply-with-carry generator producing 32-bit words.
///
/// Same `(u, v)` always produces the same sequence. The state is `Copy` so a
/// worker can take its own copy of a seed without sharing anything mutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mwc32 {
    u: u32,
    v: u32,
}

impl Mwc32 {
    /// Creates a generator from an explicit lane pair.
    pub const fn new(u: u32, v: u32) -> Self {
        Self { u, v }
    }

    /// Creates a generator whose `v` lane is the bitwise complement of `u`.
    pub const fn from_seed_word(u: u32) -> Self {
        Self::new(u, !u)
    }

    /// Current `(u, v)` lane values.
    pub const fn state(&self) -> (u32, u32) {
        (self.u, self.v)
    }

    /// Whether either lane is stuck, now or after its first draw.
    ///
    /// A lane update is congruent to multiplying by `2^-16` modulo
    /// `m = a * 2^16 - 1`, so a lane that is a multiple of `m` lands on `0`
    /// or on `m` (both fixed points) after one draw and stays there, leaving
    /// half of every output word constant. Every other lane keeps a non-zero
    /// residue forever and never gets stuck.
    pub const fn is_degenerate(&self) -> bool {
        self.u % U_MODULUS == 0 || self.v % V_MODULUS == 0
    }

    /// Advances both lanes and returns the next 32-bit word.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.v = V_MULTIPLIER
            .wrapping_mul(self.v & LOW_HALF)
            .wrapping_add(self.v >> HALF_BITS);
        self.u = U_MULTIPLIER
            .wrapping_mul(self.u & LOW_HALF)
            .wrapping_add(self.u >> HALF_BITS);
        (self.v << HALF_BITS) | (self.u & LOW_HALF)
    }

    /// Draws two words and returns them as a fresh generator state.
    ///
    /// The first draw becomes `u`, the second `v`. Used to give every batch
    /// (and every worker) its own stream derived from a running state.
    #[inline]
    pub fn derive(&mut self) -> Self {
        let u = self.next_u32();
        let v = self.next_u32();
        Self::new(u, v)
    }
}

impl WordSource for Mwc32 {
    #[inline]
    fn next_word(&mut self) -> u32 {
        self.next_u32()
    }
}
