//! Locale word banks.
//!
//! A `LocaleBank` is the parsed form of one `<code>.json` file. Banks are
//! validated on load and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CatalogError, ErrorCode, Result};

/// Album label used when a locale does not define `single_label`.
pub const DEFAULT_SINGLE_LABEL: &str = "Single";

/// Word lists used to build song titles. All three lists are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleWords {
    pub adjectives: Vec<String>,
    pub nouns: Vec<String>,
    pub suffixes: Vec<String>,
}

/// Optional album vocabulary. Each missing or empty list falls back to
/// the generic album words independently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumWords {
    #[serde(default)]
    pub adjectives: Option<Vec<String>>,
    #[serde(default)]
    pub nouns: Option<Vec<String>>,
    #[serde(default)]
    pub suffixes: Option<Vec<String>>,
}

/// Optional region-specific name data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameTable {
    #[serde(default)]
    pub first_names: Vec<String>,
    #[serde(default)]
    pub last_names: Vec<String>,
    #[serde(default)]
    pub companies: Vec<String>,
}

/// Lexical data for one locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleBank {
    /// Locale code the bank was loaded for (not part of the file).
    #[serde(skip)]
    pub code: String,

    pub title_words: TitleWords,

    #[serde(default)]
    pub album_words: Option<AlbumWords>,

    /// Non-empty.
    pub genres: Vec<String>,

    /// Non-empty.
    pub review_phrases: Vec<String>,

    #[serde(default)]
    pub single_label: Option<String>,

    #[serde(default)]
    pub names: Option<NameTable>,
}

impl LocaleBank {
    /// Loads and validates `<dir>/<code>.json`.
    ///
    /// A missing or unreadable file is `LOCALE_NOT_FOUND`; a file that parses
    /// but breaks the data contract is `LOCALE_INVALID`. No partially valid
    /// bank is ever returned.
    pub fn load(dir: &Path, code: &str) -> Result<Self> {
        if !is_plain_code(code) {
            return Err(CatalogError::locale_not_found(code));
        }

        let path = dir.join(format!("{}.json", code));
        let text = std::fs::read_to_string(&path).map_err(|e| {
            CatalogError::with_source(
                ErrorCode::LocaleNotFound,
                format!("Locale JSON not found for {} at {}", code, path.display()),
                e,
            )
        })?;

        Self::from_json(code, &text)
    }

    /// Parses and validates a bank from JSON text.
    pub fn from_json(code: &str, text: &str) -> Result<Self> {
        let mut bank: LocaleBank = serde_json::from_str(text).map_err(|e| {
            CatalogError::with_source(
                ErrorCode::LocaleInvalid,
                format!("Locale {} is invalid: {}", code, e),
                e,
            )
        })?;
        bank.code = code.to_string();

        if let Some(reason) = bank.validate() {
            return Err(CatalogError::locale_invalid(code, reason));
        }
        Ok(bank)
    }

    /// Validates the data contract.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        let words = &self.title_words;
        for (name, list) in [
            ("adjectives", &words.adjectives),
            ("nouns", &words.nouns),
            ("suffixes", &words.suffixes),
        ] {
            if list.is_empty() {
                return Some(format!("title_words.{} must not be empty", name));
            }
        }
        if self.genres.is_empty() {
            return Some("genres must not be empty".to_string());
        }
        if self.review_phrases.is_empty() {
            return Some("review_phrases must not be empty".to_string());
        }
        None
    }

    /// Returns the label used for singles.
    pub fn single_label(&self) -> &str {
        self.single_label
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SINGLE_LABEL)
    }

    /// Returns the locale's album adjectives, if it defines any.
    pub fn album_adjectives(&self) -> Option<&[String]> {
        self.album_list(|aw| aw.adjectives.as_deref())
    }

    /// Returns the locale's album nouns, if it defines any.
    pub fn album_nouns(&self) -> Option<&[String]> {
        self.album_list(|aw| aw.nouns.as_deref())
    }

    /// Returns the locale's album suffixes, if it defines any.
    pub fn album_suffixes(&self) -> Option<&[String]> {
        self.album_list(|aw| aw.suffixes.as_deref())
    }

    fn album_list<'a>(
        &'a self,
        select: impl Fn(&'a AlbumWords) -> Option<&'a [String]>,
    ) -> Option<&'a [String]> {
        self.album_words
            .as_ref()
            .and_then(select)
            .filter(|list| !list.is_empty())
    }
}

/// Locale codes name files, so only letters, digits, `-` and `_` pass.
fn is_plain_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
