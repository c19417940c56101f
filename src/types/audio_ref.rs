//! Audio reference type.
//!
//! An `AudioRef` is everything needed to re-derive an entry's audio clip:
//! the seed text, page, global index and duration. Catalog entries expose it
//! as a URL; any consumer (single fetch, bulk export) parses that URL back
//! and synthesizes from scratch instead of reusing bytes.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::audio::clamp_seconds;
use crate::error::{CatalogError, Result};
use crate::rng::{derive_stream, parse_seed, Seed, Stream};

/// Path component of audio URLs.
pub const AUDIO_PATH: &str = "/api/audio.wav";

/// Duration referenced by catalog entries.
pub const CATALOG_AUDIO_SECONDS: u32 = 10;

/// Identity of an audio clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioRef {
    /// Seed exactly as the client supplied it (re-parsed on use).
    pub seed: String,
    /// 1-based catalog page.
    pub page: u64,
    /// Global 1-based catalog index.
    pub index: u64,
    /// Requested duration; clamped at synthesis time.
    pub seconds: u32,
}

impl AudioRef {
    pub fn new(seed: impl Into<String>, page: u64, index: u64, seconds: u32) -> Self {
        Self {
            seed: seed.into(),
            page,
            index,
            seconds,
        }
    }

    /// Canonical seed value.
    pub fn seed_value(&self) -> Seed {
        parse_seed(&self.seed)
    }

    /// Stream salt: `page * 1000 + index`, wrapping.
    ///
    /// Every call site that wants this clip must use this salt, or listings
    /// and downloads drift apart.
    pub fn salt(&self) -> u64 {
        self.page.wrapping_mul(1000).wrapping_add(self.index)
    }

    /// Derives the synthesis stream for this clip.
    pub fn stream(&self) -> Stream {
        derive_stream(self.seed_value(), self.salt())
    }

    /// Renders the reference as a URL, e.g.
    /// `/api/audio.wav?seed=0x1&page=1&index=3&seconds=10`.
    pub fn to_url(&self) -> String {
        format!(
            "{}?seed={}&page={}&index={}&seconds={}",
            AUDIO_PATH,
            urlencoding::encode(&self.seed),
            self.page,
            self.index,
            self.seconds
        )
    }

    /// Parses a reference produced by [`AudioRef::to_url`].
    ///
    /// Accepts a full URL, a path with query, or a bare query string.
    /// `seed`, `page` and `index` are required; a missing or unparsable
    /// `seconds` falls back to the catalog duration.
    pub fn parse(reference: &str) -> Result<Self> {
        let query = match reference.split_once('?') {
            Some((_, query)) => query,
            None => reference,
        };

        let mut seed = None;
        let mut page = None;
        let mut index = None;
        let mut seconds = None;

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(raw)
                .ok_or_else(|| CatalogError::invalid_audio_ref(reference, "bad percent-encoding"))?;
            match key {
                "seed" => seed = Some(value),
                "page" => page = Some(value),
                "index" => index = Some(value),
                "seconds" => seconds = Some(value),
                _ => {}
            }
        }

        let seed = seed.ok_or_else(|| CatalogError::invalid_audio_ref(reference, "missing seed"))?;
        let page = parse_number(reference, "page", page)?;
        let index = parse_number(reference, "index", index)?;
        let seconds = seconds
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&s| s > 0)
            .unwrap_or(CATALOG_AUDIO_SECONDS);

        Ok(Self {
            seed,
            page,
            index,
            seconds,
        })
    }

    /// Stable ID for the rendered clip. See [`compute_artifact_id`].
    pub fn artifact_id(&self) -> String {
        compute_artifact_id(self.seed_value(), self.page, self.index, self.seconds)
    }
}

/// Computes a deterministic artifact ID for an audio clip.
///
/// The ID is the first 16 hex characters of the SHA256 hash of
/// `{seed}:{page}:{index}:{seconds}` using the canonical seed value and the
/// clamped duration, so seed spellings that parse alike ("1", "0x1") share
/// an ID.
pub fn compute_artifact_id(seed: Seed, page: u64, index: u64, seconds: u32) -> String {
    let input = format!(
        "{}:{}:{}:{}",
        seed.value(),
        page,
        index,
        clamp_seconds(seconds)
    );
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();
    // Take first 8 bytes (16 hex chars)
    hex::encode(&result[..8])
}

/// Form-style decoding: `+` is a space, then percent escapes.
fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|v| v.into_owned())
}

fn parse_number(reference: &str, key: &str, value: Option<String>) -> Result<u64> {
    let value =
        value.ok_or_else(|| CatalogError::invalid_audio_ref(reference, format!("missing {}", key)))?;
    value.trim().parse::<u64>().map_err(|_| {
        CatalogError::invalid_audio_ref(reference, format!("{} '{}' is not a number", key, value))
    })
}
