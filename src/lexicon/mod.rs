//! Per-locale word lists and the name-provider chain.
//!
//! Locale data is read from `<code>.json` files, loaded at most once per
//! locale by [`LexiconCache`] and shared read-only afterwards.

pub mod bank;
pub mod cache;
pub mod names;

// Re-export commonly used types
pub use bank::{AlbumWords, LocaleBank, NameTable, TitleWords, DEFAULT_SINGLE_LABEL};
pub use cache::LexiconCache;
pub use names::{FixedNames, NameChain, NameProvider};
