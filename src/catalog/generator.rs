//! Catalog page generation.
//!
//! **Draw protocol.** Each entry consumes draws from the page stream in the
//! fixed order listed in [`ITEM_DRAW_PROTOCOL`]. Changing the order, or the
//! number of draws any step makes, changes every later entry on the page
//! and breaks compatibility with previously published catalogs.

use log::debug;
use serde::{Deserialize, Serialize};

use super::likes::{likes_for, MAX_LIKES};
use crate::error::Result;
use crate::lexicon::{LexiconCache, LocaleBank, NameChain, TitleWords};
use crate::rng::{derive_stream, parse_seed, Seed, Stream};
use crate::types::{AudioRef, CatalogPage, CoverParams, SongRecord, CATALOG_AUDIO_SECONDS, TOTAL_COUNT};

/// Largest page the generator will produce.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when a request does not give one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Draws discarded at the start of every entry. Kept at exactly 3 for
/// output compatibility.
pub const BURN_IN_DRAWS: usize = 3;

const BAND_TAILS: [&str; 10] = [
    "Collective", "Trio", "Quartet", "Band", "Project", "Club", "Ensemble", "Syndicate", "Unit",
    "Crew",
];

const GENERIC_ALBUM_ADJECTIVES: [&str; 14] = [
    "Golden", "Neon", "Hidden", "Loud", "Quiet", "Liquid", "Sacred", "Soft", "Cold", "Burning",
    "Noisy", "Deep", "Early", "Late",
];

const GENERIC_ALBUM_NOUNS: [&str; 12] = [
    "Rooms", "Signals", "Stories", "Hearts", "Lights", "Waves", "Skies", "Windows", "Machines",
    "Echoes", "Sparks", "Shadows",
];

const GENERIC_ALBUM_SUFFIXES: [&str; 8] = [
    "Vol. I", "Vol. II", "Deluxe", "(EP)", "Sessions", "Tapes", "Stories", "Diary",
];

/// One step of the per-entry draw sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    /// [`BURN_IN_DRAWS`] discarded draws.
    BurnIn,
    /// Pattern choice (1-2 draws) then 2-3 word picks.
    Title,
    /// Band/person choice, then name draws from the name chain.
    Artist,
    /// Single check, then pattern choice and two word picks.
    Album,
    /// One pick from the locale genres.
    Genre,
    /// Hue, saturation offset, luminance offset.
    CoverColor,
    /// One pick from the locale review phrases.
    Review,
}

/// Order in which an entry consumes the page stream.
pub const ITEM_DRAW_PROTOCOL: [DrawKind; 7] = [
    DrawKind::BurnIn,
    DrawKind::Title,
    DrawKind::Artist,
    DrawKind::Album,
    DrawKind::Genre,
    DrawKind::CoverColor,
    DrawKind::Review,
];

/// A page request as received from a client, before clamping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageRequest {
    #[serde(alias = "lang")]
    pub locale: String,
    pub seed: String,
    pub page: i64,
    pub page_size: i64,
    #[serde(alias = "likesAvg")]
    pub likes: f64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            seed: "1".to_string(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE as i64,
            likes: 3.7,
        }
    }
}

impl PageRequest {
    /// Clamps the numeric fields into their valid domains.
    pub fn params(&self) -> PageParams {
        PageParams::new(&self.seed, self.page, self.page_size, self.likes)
    }
}

/// Clamped page parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PageParams {
    /// Seed as supplied, carried into audio references.
    pub seed_text: String,
    pub seed: Seed,
    /// At least 1.
    pub page: u64,
    /// 1 to [`MAX_PAGE_SIZE`].
    pub page_size: u32,
    /// 0 to 10.
    pub likes_avg: f64,
}

impl PageParams {
    /// Builds parameters, silently clamping out-of-range values.
    pub fn new(seed_text: &str, page: i64, page_size: i64, likes_avg: f64) -> Self {
        let likes_avg = if likes_avg.is_finite() {
            likes_avg.clamp(0.0, MAX_LIKES)
        } else {
            0.0
        };
        Self {
            seed_text: seed_text.to_string(),
            seed: parse_seed(seed_text),
            page: page.max(1) as u64,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE as i64) as u32,
            likes_avg,
        }
    }

    /// Global 1-based index of the entry at `position` on this page.
    pub fn global_index(&self, position: u32) -> u64 {
        (self.page - 1)
            .wrapping_mul(u64::from(self.page_size))
            .wrapping_add(u64::from(position))
            .wrapping_add(1)
    }
}

/// Builds a catalog page, loading the locale through the cache.
///
/// Fails only if the locale cannot be loaded.
pub fn build_page(cache: &LexiconCache, locale: &str, params: &PageParams) -> Result<CatalogPage> {
    let bank = cache.get(locale)?;
    let names = cache.name_chain(locale)?;
    Ok(build_page_with(&bank, &names, params))
}

/// Builds a catalog page from an already loaded bank and name chain.
pub fn build_page_with(bank: &LocaleBank, names: &NameChain, params: &PageParams) -> CatalogPage {
    let mut stream = derive_stream(params.seed, params.page);

    let items: Vec<SongRecord> = (0..params.page_size)
        .map(|position| {
            let index = params.global_index(position);
            let draft = draw_entry(&mut stream, bank, names);
            let likes = likes_for(params.seed, index, params.likes_avg);
            let audio = AudioRef::new(
                params.seed_text.clone(),
                params.page,
                index,
                CATALOG_AUDIO_SECONDS,
            );

            SongRecord {
                index,
                cover_url: draft.cover.url(&draft.title, &draft.artist),
                audio_url: audio.to_url(),
                title: draft.title,
                artist: draft.artist,
                album: draft.album,
                genre: draft.genre,
                likes,
                cover: draft.cover,
                review: draft.review,
            }
        })
        .collect();

    debug!(
        "Built page {} of seed {} ({} items, locale {})",
        params.page,
        params.seed,
        items.len(),
        bank.code
    );

    CatalogPage {
        page: params.page,
        page_size: params.page_size,
        total_count: TOTAL_COUNT,
        items,
    }
}

/// Stream-derived fields of one entry.
#[derive(Debug, Default)]
struct EntryDraft {
    title: String,
    artist: String,
    album: String,
    genre: String,
    cover: CoverParams,
    review: String,
}

fn draw_entry(stream: &mut Stream, bank: &LocaleBank, names: &NameChain) -> EntryDraft {
    let mut draft = EntryDraft::default();
    for kind in ITEM_DRAW_PROTOCOL {
        match kind {
            DrawKind::BurnIn => stream.burn(BURN_IN_DRAWS),
            DrawKind::Title => draft.title = draw_title(stream, &bank.title_words),
            DrawKind::Artist => draft.artist = draw_artist(stream, names),
            DrawKind::Album => draft.album = draw_album(stream, bank),
            DrawKind::Genre => draft.genre = pick_text(stream, &bank.genres),
            DrawKind::CoverColor => draft.cover = draw_cover(stream),
            DrawKind::Review => draft.review = pick_text(stream, &bank.review_phrases),
        }
    }
    draft
}

fn pick_text(stream: &mut Stream, list: &[String]) -> String {
    stream.pick(list).cloned().unwrap_or_default()
}

/// Picks from the locale list when present, else from the generic list.
fn pick_word(stream: &mut Stream, locale: Option<&[String]>, generic: &[&str]) -> String {
    match locale {
        Some(list) => pick_text(stream, list),
        None => stream.pick(generic).map(|s| s.to_string()).unwrap_or_default(),
    }
}

fn draw_title(stream: &mut Stream, words: &TitleWords) -> String {
    // The second threshold is only drawn when the first misses.
    if stream.next_f64() < 0.5 {
        let adjective = pick_text(stream, &words.adjectives);
        let noun = pick_text(stream, &words.nouns);
        format!("{} {}", adjective, noun)
    } else if stream.next_f64() < 0.75 {
        let first = pick_text(stream, &words.nouns);
        let second = pick_text(stream, &words.nouns);
        format!("{} of {}", first, second)
    } else {
        let adjective = pick_text(stream, &words.adjectives);
        let noun = pick_text(stream, &words.nouns);
        let suffix = pick_text(stream, &words.suffixes);
        format!("{} {} {}", adjective, noun, suffix)
    }
}

fn draw_artist(stream: &mut Stream, names: &NameChain) -> String {
    if stream.next_f64() < 0.5 {
        let base = names.company_name(stream);
        let tail = stream.pick(&BAND_TAILS[..]).copied().unwrap_or("Band");
        format!("{} {}", base, tail)
    } else {
        let first = names.first_name(stream);
        let last = names.last_name(stream);
        format!("{} {}", first, last)
    }
}

fn draw_album(stream: &mut Stream, bank: &LocaleBank) -> String {
    if stream.next_f64() < 0.28 {
        return bank.single_label().to_string();
    }
    if stream.next_f64() < 0.6 {
        let adjective = pick_word(stream, bank.album_adjectives(), &GENERIC_ALBUM_ADJECTIVES);
        let noun = pick_word(stream, bank.album_nouns(), &GENERIC_ALBUM_NOUNS);
        format!("{} {}", adjective, noun)
    } else {
        let noun = pick_word(stream, bank.album_nouns(), &GENERIC_ALBUM_NOUNS);
        let suffix = pick_word(stream, bank.album_suffixes(), &GENERIC_ALBUM_SUFFIXES);
        format!("{} {}", noun, suffix)
    }
}

fn draw_cover(stream: &mut Stream) -> CoverParams {
    let hue = stream.int_in(0, 359);
    let sat = 50 + stream.int_in(-10, 10);
    let lum = 20 + stream.int_in(0, 20);
    CoverParams {
        hue: hue as u16,
        sat: sat as u8,
        lum: lum as u8,
    }
}
