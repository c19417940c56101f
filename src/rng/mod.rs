//! Seed canonicalization and derived pseudo-random streams.
//!
//! Every piece of generated content is a pure function of a [`Seed`] and a
//! salt. The salt separates concerns (page metadata, likes, audio) so that
//! the number of draws made for one concern never shifts another.

pub mod seed;
pub mod stream;

// Re-export commonly used items
pub use seed::{parse_seed, random_seed, Seed};
pub use stream::{derive_stream, Stream, GOLDEN, ZERO_STATE_REPLACEMENT};
