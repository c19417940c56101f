//! Core types for the musicstore daemon.
//!
//! This module re-exports the records produced by catalog generation:
//! - [`SongRecord`]: One generated catalog entry
//! - [`CatalogPage`]: A page of entries with paging metadata
//! - [`AudioRef`]: The re-derivable identity of an entry's audio clip

mod audio_ref;
mod song;

// Re-export all types at the module level
pub use audio_ref::{compute_artifact_id, AudioRef, AUDIO_PATH, CATALOG_AUDIO_SECONDS};
pub use song::{CatalogPage, CoverParams, SongRecord, COVER_PATH, TOTAL_COUNT};
