//! musicstore-daemon: a deterministic synthetic music catalog.
//!
//! Every title, artist, album, cover and audio clip is a pure function of a
//! seed and a position in the catalog. The same (seed, page, index) yields
//! byte-identical metadata and audio whether it is reached through a page
//! listing, a single clip request or a bulk export.
//!
//! # Modules
//!
//! - [`rng`]: Seed parsing and the seeded draw stream
//! - [`lexicon`]: Locale word banks, their cache and the name provider chain
//! - [`catalog`]: Page generation and likes
//! - [`audio`]: Clip synthesis and WAV encoding
//! - [`cover`]: SVG cover rendering
//! - [`export`]: Bulk WAV export of a page
//! - [`types`]: Song records and audio references
//! - [`config`]: Runtime configuration (CatalogConfig)
//! - [`error`]: Error types and codes (CatalogError, ErrorCode)
//! - [`rpc`]: JSON-RPC over stdio
//!
//! # Example
//!
//! ```rust,no_run
//! use musicstore_daemon::{
//!     catalog::{build_page, PageParams},
//!     export::render_clip,
//!     lexicon::LexiconCache,
//! };
//!
//! let cache = LexiconCache::new("./locales");
//! let params = PageParams::new("0xC0FFEE", 1, 10, 3.7);
//! let page = build_page(&cache, "en-US", &params)?;
//!
//! let first = &page.items[0];
//! let wav = render_clip(&first.audio_ref()?).to_wav()?;
//! # Ok::<(), musicstore_daemon::CatalogError>(())
//! ```

pub mod audio;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod cover;
pub mod error;
pub mod export;
pub mod lexicon;
pub mod rng;
pub mod rpc;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use config::CatalogConfig;
pub use error::{CatalogError, ErrorCode, Result};
pub use rng::{parse_seed, random_seed, Seed, Stream};
pub use types::{compute_artifact_id, AudioRef, CatalogPage, SongRecord};
