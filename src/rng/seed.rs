//! Seed parsing.
//!
//! A seed arrives as free text from a query string or the command line and
//! is canonicalized to a `u64`. Parsing never fails: text that is neither
//! decimal nor `0x`-hex is hashed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Multiplier of the rolling hash used for non-numeric seed text.
const HASH_MULTIPLIER: u64 = 131;

/// Canonical 64-bit seed anchoring all derived randomness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(u64);

impl Seed {
    /// Returns the raw seed value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Parses seed text. Equivalent to [`parse_seed`].
    pub fn parse(text: &str) -> Self {
        parse_seed(text)
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Seed(value)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Canonicalizes seed text into a [`Seed`].
///
/// Accepted forms, tried in order on the trimmed text:
/// - empty: seed 0
/// - `0x`/`0X` followed by hex digits
/// - decimal digits with an optional leading `-`
///
/// Numeric values wider than 64 bits wrap modulo 2^64 and negative decimals
/// map to their two's complement. Anything else is hashed with a base-131
/// rolling hash over the untrimmed text's characters.
pub fn parse_seed(text: &str) -> Seed {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Seed(0);
    }

    if let Some(value) = parse_hex(trimmed).or_else(|| parse_decimal(trimmed)) {
        return Seed(value);
    }

    Seed(rolling_hash(text))
}

/// Returns a fresh random seed in canonical `0x` text form.
///
/// This is the only non-deterministic entry point in the crate; it exists
/// so clients can offer a "shuffle" action.
pub fn random_seed() -> String {
    format!("0x{:x}", rand::random::<u64>())
}

fn parse_hex(text: &str) -> Option<u64> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))?;
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0u64, |acc, c| {
        c.to_digit(16)
            .map(|d| acc.wrapping_mul(16).wrapping_add(u64::from(d)))
    })
}

fn parse_decimal(text: &str) -> Option<u64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.chars().try_fold(0u64, |acc, c| {
        c.to_digit(10)
            .map(|d| acc.wrapping_mul(10).wrapping_add(u64::from(d)))
    })?;
    Some(if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    })
}

fn rolling_hash(text: &str) -> u64 {
    text.chars().fold(0u64, |h, c| {
        h.wrapping_mul(HASH_MULTIPLIER).wrapping_add(u64::from(c))
    })
}
