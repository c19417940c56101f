//! Bulk WAV export of a catalog page.
//!
//! Each item's clip is re-derived by parsing the audio reference the catalog
//! exposed for it, the same way a single download does. Nothing is cached
//! between items.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::audio::{synthesize, write_wav, PcmBuffer};
use crate::catalog::{build_page, PageParams};
use crate::error::Result;
use crate::lexicon::LexiconCache;
use crate::types::{AudioRef, SongRecord};

/// Largest page an export will render.
pub const MAX_EXPORT_SIZE: i64 = 40;

/// Page size used when the request leaves it out.
pub const DEFAULT_EXPORT_SIZE: i64 = 10;

/// An export request as received from a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportRequest {
    #[serde(alias = "lang")]
    pub locale: String,
    pub seed: String,
    pub page: i64,
    pub page_size: i64,
    pub likes: f64,
    /// Target directory; the configured output directory when absent.
    pub dir: Option<PathBuf>,
}

impl Default for ExportRequest {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            seed: "1".to_string(),
            page: 1,
            page_size: DEFAULT_EXPORT_SIZE,
            likes: 3.7,
            dir: None,
        }
    }
}

impl ExportRequest {
    /// Page parameters with the page size clamped to the export limit.
    pub fn params(&self) -> PageParams {
        PageParams::new(
            &self.seed,
            self.page,
            self.page_size.clamp(1, MAX_EXPORT_SIZE),
            self.likes,
        )
    }
}

/// One written export file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedFile {
    /// Global catalog index of the source entry.
    pub index: u64,
    pub name: String,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Synthesizes the clip an audio reference points at.
pub fn render_clip(audio: &AudioRef) -> PcmBuffer {
    synthesize(&mut audio.stream(), audio.seconds)
}

/// Exports every entry of a page as a WAV file under `out_dir`.
///
/// `on_progress` is called after each file with the 1-based count written so
/// far and the page length.
pub fn export_page<F>(
    cache: &LexiconCache,
    request: &ExportRequest,
    out_dir: &Path,
    mut on_progress: F,
) -> Result<Vec<ExportedFile>>
where
    F: FnMut(usize, usize, &ExportedFile),
{
    let params = request.params();
    let page = build_page(cache, &request.locale, &params)?;
    let total = page.items.len();

    let mut used = HashSet::with_capacity(total);
    let mut files = Vec::with_capacity(total);

    for item in &page.items {
        let audio = item.audio_ref()?;
        let wav = render_clip(&audio).to_wav()?;

        let name = unique_name(&mut used, &export_file_name(item));
        let path = out_dir.join(&name);
        write_wav(&wav, &path)?;

        info!("Exported {} ({} bytes)", path.display(), wav.len());

        let file = ExportedFile {
            index: item.index,
            name,
            path,
            bytes: wav.len(),
        };
        on_progress(files.len() + 1, total, &file);
        files.push(file);
    }

    Ok(files)
}

/// `<title> - <artist> - <album>.wav`, each part sanitized.
pub fn export_file_name(item: &SongRecord) -> String {
    format!(
        "{} - {} - {}.wav",
        sanitize_component(&item.title),
        sanitize_component(&item.artist),
        sanitize_component(&item.album)
    )
}

/// Replaces every character outside `[A-Za-z0-9-_. ]` with `_`.
pub fn sanitize_component(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Appends ` (2)`, ` (3)`, ... before the extension until the name is unused.
fn unique_name(used: &mut HashSet<String>, name: &str) -> String {
    if used.insert(name.to_string()) {
        return name.to_string();
    }
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) => (stem, format!(".{}", ext)),
        None => (name, String::new()),
    };
    let mut n = 2;
    loop {
        let candidate = format!("{} ({}){}", stem, n, ext);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
