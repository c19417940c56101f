//! Lexicon cache.
//!
//! Each locale is loaded on first use and shared read-only afterwards. The
//! cache is an explicit object owned by whoever serves requests and passed
//! into generation calls; there is no process-wide state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use log::{debug, info};

use super::bank::LocaleBank;
use super::names::{NameChain, NameProvider};
use crate::error::Result;

/// Lazily populated, read-only-after-load locale cache.
#[derive(Debug)]
pub struct LexiconCache {
    /// Directory holding `<code>.json` files.
    root: PathBuf,
    /// Loaded banks indexed by locale code.
    banks: RwLock<HashMap<String, Arc<LocaleBank>>>,
}

impl LexiconCache {
    /// Creates an empty cache reading from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            banks: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the locale directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the bank for `code`, loading it on first request.
    ///
    /// Load failures are not cached; a later request retries the file.
    pub fn get(&self, code: &str) -> Result<Arc<LocaleBank>> {
        {
            let banks = self.banks.read().unwrap_or_else(|e| e.into_inner());
            if let Some(bank) = banks.get(code) {
                return Ok(Arc::clone(bank));
            }
        }

        let bank = Arc::new(LocaleBank::load(&self.root, code)?);
        info!(
            "Loaded locale {} ({} genres, {} review phrases)",
            code,
            bank.genres.len(),
            bank.review_phrases.len()
        );

        let mut banks = self.banks.write().unwrap_or_else(|e| e.into_inner());
        // Another loader may have won the race; keep the first bank.
        Ok(Arc::clone(banks.entry(code.to_string()).or_insert(bank)))
    }

    /// Eagerly loads the given locales, failing on the first missing one.
    pub fn preload(&self, codes: &[&str]) -> Result<()> {
        for code in codes {
            self.get(code)?;
        }
        Ok(())
    }

    /// Builds the name chain for `code`: region bank, then the bank named
    /// after the language subtag if one exists.
    ///
    /// The region bank must load; the generic level is optional.
    pub fn name_chain(&self, code: &str) -> Result<NameChain> {
        let region = self.get(code)?;
        let mut providers: Vec<Arc<dyn NameProvider>> = vec![region];

        if let Some(language) = language_subtag(code) {
            match self.get(language) {
                Ok(generic) => providers.push(generic),
                Err(e) => debug!("No generic name table for {}: {}", language, e.message),
            }
        }

        Ok(NameChain::new(providers))
    }

    /// Returns the number of loaded locales.
    pub fn len(&self) -> usize {
        self.banks.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Returns true if no locale has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `code` is already loaded.
    pub fn contains(&self, code: &str) -> bool {
        self.banks
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(code)
    }
}

/// `de` for `de-DE`; `None` when the code has no region part.
fn language_subtag(code: &str) -> Option<&str> {
    let (language, _) = code.split_once(['-', '_'])?;
    (!language.is_empty()).then_some(language)
}
