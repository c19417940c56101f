//! Song record types.
//!
//! A `SongRecord` is a pure function of (locale, seed, page, page size,
//! likes average, position in page). Records are never mutated after
//! generation.

use serde::{Deserialize, Serialize};

/// Path component of cover URLs.
pub const COVER_PATH: &str = "/api/cover.svg";

/// Advertised catalog size. The catalog is unbounded; clients page through
/// this many entries.
pub const TOTAL_COUNT: u64 = 1_000_000;

/// Colour parameters drawn for an entry's cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverParams {
    /// Hue in degrees, 0-359.
    pub hue: u16,
    /// Saturation percent, 40-60.
    pub sat: u8,
    /// Base luminance percent, 20-40.
    pub lum: u8,
}

impl CoverParams {
    /// Renders the cover URL for a title/artist pair.
    pub fn url(&self, title: &str, artist: &str) -> String {
        format!(
            "{}?title={}&artist={}&hue={}&sat={}&lum={}",
            COVER_PATH,
            urlencoding::encode(title),
            urlencoding::encode(artist),
            self.hue,
            self.sat,
            self.lum
        )
    }
}

/// One generated catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongRecord {
    /// Global 1-based catalog index.
    pub index: u64,
    pub title: String,
    pub artist: String,
    /// Album name, or the locale's single label.
    pub album: String,
    pub genre: String,
    /// 0-10.
    pub likes: u8,
    pub cover: CoverParams,
    pub cover_url: String,
    /// Serialized [`AudioRef`](super::AudioRef); parse it to re-derive audio.
    pub audio_url: String,
    pub review: String,
}

impl SongRecord {
    /// Parses the entry's audio reference.
    pub fn audio_ref(&self) -> crate::error::Result<super::AudioRef> {
        super::AudioRef::parse(&self.audio_url)
    }
}

/// A page of catalog entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub page: u64,
    pub page_size: u32,
    pub total_count: u64,
    pub items: Vec<SongRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_url_encodes_text() {
        let params = CoverParams {
            hue: 10,
            sat: 50,
            lum: 30,
        };
        let url = params.url("Rock & Roll", "A/B");
        assert_eq!(
            url,
            "/api/cover.svg?title=Rock%20%26%20Roll&artist=A%2FB&hue=10&sat=50&lum=30"
        );
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = SongRecord {
            index: 1,
            title: "t".into(),
            artist: "a".into(),
            album: "Single".into(),
            genre: "g".into(),
            likes: 3,
            cover: CoverParams {
                hue: 0,
                sat: 50,
                lum: 20,
            },
            cover_url: "/api/cover.svg".into(),
            audio_url: "/api/audio.wav?seed=1&page=1&index=1&seconds=10".into(),
            review: "r".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("coverUrl").is_some());
        assert!(json.get("audioUrl").is_some());
        assert_eq!(record.audio_ref().unwrap().index, 1);
    }
}
