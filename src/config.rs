//! Catalog configuration module.
//!
//! Holds where locale banks are read from, where rendered files go, and the
//! defaults applied to requests that leave fields out.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::audio::{MAX_SECONDS, MIN_SECONDS};
use crate::catalog::MAX_PAGE_SIZE;

/// Runtime configuration for the catalog.
///
/// Loaded from environment variables at startup; command-line flags
/// override individual fields afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory containing `<code>.json` locale banks.
    /// If None, uses `./locales`.
    pub locales_path: Option<PathBuf>,

    /// Directory for rendered WAV/SVG files and exports.
    /// If None, uses the platform-specific cache location.
    pub output_path: Option<PathBuf>,

    /// Locale used when a request names none.
    pub default_locale: String,

    /// Page size used when a request names none.
    pub default_page_size: u32,

    /// Likes average used when a request names none.
    pub default_likes: f64,

    /// Clip length used when a request names none.
    pub default_seconds: u32,
}

impl CatalogConfig {
    /// Creates a CatalogConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a CatalogConfig from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `MUSICSTORE_LOCALES_PATH` - Locale bank directory
    /// - `MUSICSTORE_OUTPUT_PATH` - Output directory
    /// - `MUSICSTORE_LOCALE` - Default locale code
    /// - `MUSICSTORE_PAGE_SIZE` - Default page size (1-100)
    /// - `MUSICSTORE_LIKES` - Default likes average (0-10)
    /// - `MUSICSTORE_SECONDS` - Default clip length (1-15)
    ///
    /// Unset or invalid values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Like [`CatalogConfig::from_env`], reading variables through `var`.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = var("MUSICSTORE_LOCALES_PATH") {
            config.locales_path = Some(PathBuf::from(path));
        }

        if let Some(path) = var("MUSICSTORE_OUTPUT_PATH") {
            config.output_path = Some(PathBuf::from(path));
        }

        if let Some(locale) = var("MUSICSTORE_LOCALE") {
            let locale = locale.trim();
            if !locale.is_empty() {
                config.default_locale = locale.to_string();
            }
        }

        if let Some(size_str) = var("MUSICSTORE_PAGE_SIZE") {
            if let Ok(size) = size_str.trim().parse::<u32>() {
                if (1..=MAX_PAGE_SIZE).contains(&size) {
                    config.default_page_size = size;
                }
            }
        }

        if let Some(likes_str) = var("MUSICSTORE_LIKES") {
            if let Ok(likes) = likes_str.trim().parse::<f64>() {
                if (0.0..=10.0).contains(&likes) {
                    config.default_likes = likes;
                }
            }
        }

        if let Some(seconds_str) = var("MUSICSTORE_SECONDS") {
            if let Ok(seconds) = seconds_str.trim().parse::<u32>() {
                if (MIN_SECONDS..=MAX_SECONDS).contains(&seconds) {
                    config.default_seconds = seconds;
                }
            }
        }

        config
    }

    /// Returns the effective locale directory.
    pub fn effective_locales_path(&self) -> PathBuf {
        if let Some(ref path) = self.locales_path {
            path.clone()
        } else {
            PathBuf::from("./locales")
        }
    }

    /// Returns the effective output directory, using platform defaults if not specified.
    pub fn effective_output_path(&self) -> PathBuf {
        if let Some(ref path) = self.output_path {
            path.clone()
        } else {
            default_output_path()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if self.default_locale.is_empty() {
            return Some("default locale must not be empty".to_string());
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.default_page_size) {
            return Some(format!(
                "page size out of range: {} (1-{})",
                self.default_page_size, MAX_PAGE_SIZE
            ));
        }
        if !(0.0..=10.0).contains(&self.default_likes) {
            return Some(format!("likes out of range: {} (0-10)", self.default_likes));
        }
        if !(MIN_SECONDS..=MAX_SECONDS).contains(&self.default_seconds) {
            return Some(format!(
                "seconds out of range: {} ({}-{})",
                self.default_seconds, MIN_SECONDS, MAX_SECONDS
            ));
        }

        let locales = self.effective_locales_path();
        if !locales.is_dir() {
            return Some(format!("locales directory not found: {}", locales.display()));
        }

        None
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            locales_path: None,
            output_path: None,
            default_locale: "en-US".to_string(),
            default_page_size: 20,
            default_likes: 3.7,
            default_seconds: 10,
        }
    }
}

/// Returns the platform-specific default output path.
///
/// Uses the `directories` crate to find appropriate locations:
/// - macOS: ~/Library/Caches/musicstore/output
/// - Linux: ~/.cache/musicstore/output
/// - Windows: C:\Users\<user>\AppData\Local\musicstore\cache\output
fn default_output_path() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "musicstore") {
        proj_dirs.cache_dir().join("output")
    } else {
        // Fallback to current directory
        PathBuf::from("./output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn shipped() -> CatalogConfig {
        CatalogConfig {
            locales_path: Some(Path::new(env!("CARGO_MANIFEST_DIR")).join("locales")),
            ..CatalogConfig::default()
        }
    }

    #[test]
    fn defaults() {
        let config = CatalogConfig::from_vars(vars(&[]));
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.default_locale, "en-US");
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.default_likes, 3.7);
        assert_eq!(config.default_seconds, 10);
        assert_eq!(config.effective_locales_path(), PathBuf::from("./locales"));
    }

    #[test]
    fn reads_variables() {
        let config = CatalogConfig::from_vars(vars(&[
            ("MUSICSTORE_LOCALES_PATH", "/srv/locales"),
            ("MUSICSTORE_OUTPUT_PATH", "/tmp/out"),
            ("MUSICSTORE_LOCALE", "de-DE"),
            ("MUSICSTORE_PAGE_SIZE", "50"),
            ("MUSICSTORE_LIKES", "7.5"),
            ("MUSICSTORE_SECONDS", "5"),
        ]));
        assert_eq!(config.effective_locales_path(), PathBuf::from("/srv/locales"));
        assert_eq!(config.effective_output_path(), PathBuf::from("/tmp/out"));
        assert_eq!(config.default_locale, "de-DE");
        assert_eq!(config.default_page_size, 50);
        assert_eq!(config.default_likes, 7.5);
        assert_eq!(config.default_seconds, 5);
    }

    #[test]
    fn invalid_values_are_ignored() {
        let config = CatalogConfig::from_vars(vars(&[
            ("MUSICSTORE_LOCALE", "  "),
            ("MUSICSTORE_PAGE_SIZE", "0"),
            ("MUSICSTORE_LIKES", "eleven"),
            ("MUSICSTORE_SECONDS", "60"),
        ]));
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn effective_output_path_is_not_empty() {
        let config = CatalogConfig::new();
        assert!(!config.effective_output_path().as_os_str().is_empty());
    }

    #[test]
    fn config_validation() {
        let mut config = shipped();
        assert!(config.validate().is_none());

        config.default_page_size = 0;
        assert!(config.validate().is_some());

        config.default_page_size = 20;
        config.default_seconds = 16;
        assert!(config.validate().is_some());

        config.default_seconds = 10;
        config.locales_path = Some(PathBuf::from("/definitely/not/here"));
        assert!(config.validate().unwrap().contains("locales directory"));
    }
}
