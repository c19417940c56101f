//! Salted xorshift-multiply streams.
//!
//! **Determinism constraint.** The state derivation, step sequence and
//! multiplier below are part of the output format: catalog pages and audio
//! clips generated by earlier versions must stay byte-identical. All
//! arithmetic wraps modulo 2^64.

use super::seed::Seed;

/// Odd constant mixing the salt into the seed (2^64 / phi).
pub const GOLDEN: u64 = 0x9E37_79B9_7F4A_7C15;

/// Substituted for an all-zero state, which xorshift can never leave.
pub const ZERO_STATE_REPLACEMENT: u64 = 0x1066_89D4_5497_FDB5;

/// Output multiplier of the xorshift64* step.
const OUTPUT_MULTIPLIER: u64 = 0x2545_F491_4F6C_DD1D;

/// A deterministic draw sequence derived from (seed, salt).
///
/// Streams are cheap to derive and owned by the call that derived them.
/// Two streams with equal (seed, salt) produce identical sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stream {
    state: u64,
}

impl Stream {
    /// Derives the stream for `(seed, salt)`.
    pub fn derive(seed: Seed, salt: u64) -> Self {
        let mut state = seed.value() ^ salt.wrapping_mul(GOLDEN);
        if state == 0 {
            state = ZERO_STATE_REPLACEMENT;
        }
        Self { state }
    }

    /// Advances the state and returns the next raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        let mut s = self.state;
        s ^= s >> 12;
        s ^= s << 25;
        s ^= s >> 27;
        self.state = s;
        s.wrapping_mul(OUTPUT_MULTIPLIER)
    }

    /// Returns a uniform `f64` in [0, 1) built from the top 53 output bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniform integer in `[low, high]` (inclusive on both ends).
    ///
    /// Scales a single draw, so the count of consumed draws is always one.
    pub fn int_in(&mut self, low: i64, high: i64) -> i64 {
        let span = (high - low + 1) as f64;
        low + (self.next_f64() * span).floor() as i64
    }

    /// Picks one element uniformly, consuming exactly one draw.
    ///
    /// Returns the first element if the index collapses out of range and
    /// `None` only for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let idx = (self.next_f64() * items.len() as f64).floor() as usize;
        items.get(idx).or_else(|| items.first())
    }

    /// Discards `count` draws.
    pub fn burn(&mut self, count: usize) {
        for _ in 0..count {
            self.next_u64();
        }
    }
}

/// Derives the stream for `(seed, salt)`.
pub fn derive_stream(seed: Seed, salt: u64) -> Stream {
    Stream::derive(seed, salt)
}
