//! Likes generation.
//!
//! Likes use their own stream keyed by the global catalog index, so an
//! entry keeps its like count when the page size changes.

use crate::rng::{derive_stream, Seed, Stream};

/// Mixed into the seed to separate the likes domain from page metadata.
pub const LIKES_SEED_MASK: u64 = 0xBEEF;

/// Added to the global index to form the likes salt.
pub const LIKES_SALT_OFFSET: u64 = 17;

/// Upper bound of the likes average and of any like count.
pub const MAX_LIKES: f64 = 10.0;

/// Derives the likes stream for a global catalog index.
pub fn likes_stream(seed: Seed, global_index: u64) -> Stream {
    derive_stream(
        Seed::from(seed.value() ^ LIKES_SEED_MASK),
        global_index.wrapping_add(LIKES_SALT_OFFSET),
    )
}

/// Rounds a fractional average to a whole like count.
///
/// Returns `floor(avg)` plus one with probability equal to the fractional
/// part. Averages at or below 0 give 0 and at or above 10 give 10 without
/// drawing.
pub fn likes_from_avg(stream: &mut Stream, avg: f64) -> u8 {
    if avg.is_nan() || avg <= 0.0 {
        return 0;
    }
    if avg >= MAX_LIKES {
        return MAX_LIKES as u8;
    }
    let base = avg.floor();
    let bonus = if stream.next_f64() < avg - base { 1 } else { 0 };
    base as u8 + bonus
}

/// Like count of the entry at `global_index`.
pub fn likes_for(seed: Seed, global_index: u64, avg: f64) -> u8 {
    likes_from_avg(&mut likes_stream(seed, global_index), avg)
}
