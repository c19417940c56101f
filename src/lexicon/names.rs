//! Artist name providers.
//!
//! Names come from an ordered chain of providers: the region's own table,
//! then the generic language table, then a fixed in-engine list. Each
//! capability (first name, last name, company) may be absent at any level
//! and the first provider that answers wins.
//!
//! Providers draw from the caller's stream, so a name costs exactly one
//! draw at whichever level answered. Absent levels draw nothing.

use std::sync::Arc;

use super::bank::{LocaleBank, NameTable};
use crate::rng::Stream;

/// First names used when no provider in the chain has any.
pub const FALLBACK_FIRST: [&str; 8] = [
    "Alex", "Jamie", "Taylor", "Sam", "Jordan", "Casey", "Riley", "Avery",
];

/// Last names used when no provider in the chain has any.
pub const FALLBACK_LAST: [&str; 8] = [
    "Keller", "Meyer", "Fischer", "Schmidt", "Brown", "Johnson", "Lee", "Davis",
];

/// A source of artist names. Every capability is optional.
pub trait NameProvider: Send + Sync {
    fn first_name(&self, _stream: &mut Stream) -> Option<String> {
        None
    }

    fn last_name(&self, _stream: &mut Stream) -> Option<String> {
        None
    }

    fn company_name(&self, _stream: &mut Stream) -> Option<String> {
        None
    }
}

/// Picks from a list, or reports absence without drawing.
fn pick_listed(stream: &mut Stream, list: &[String]) -> Option<String> {
    if list.is_empty() {
        return None;
    }
    stream.pick(list).cloned()
}

impl NameProvider for NameTable {
    fn first_name(&self, stream: &mut Stream) -> Option<String> {
        pick_listed(stream, &self.first_names)
    }

    fn last_name(&self, stream: &mut Stream) -> Option<String> {
        pick_listed(stream, &self.last_names)
    }

    fn company_name(&self, stream: &mut Stream) -> Option<String> {
        pick_listed(stream, &self.companies)
    }
}

impl NameProvider for LocaleBank {
    fn first_name(&self, stream: &mut Stream) -> Option<String> {
        self.names.as_ref()?.first_name(stream)
    }

    fn last_name(&self, stream: &mut Stream) -> Option<String> {
        self.names.as_ref()?.last_name(stream)
    }

    fn company_name(&self, stream: &mut Stream) -> Option<String> {
        self.names.as_ref()?.company_name(stream)
    }
}

/// Terminal provider: always answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedNames;

impl FixedNames {
    pub fn first(&self, stream: &mut Stream) -> String {
        stream.pick(&FALLBACK_FIRST[..]).copied().unwrap_or("Alex").to_string()
    }

    pub fn last(&self, stream: &mut Stream) -> String {
        stream.pick(&FALLBACK_LAST[..]).copied().unwrap_or("Keller").to_string()
    }

    pub fn company(&self, stream: &mut Stream) -> String {
        format!("{} GmbH", self.last(stream))
    }
}

impl NameProvider for FixedNames {
    fn first_name(&self, stream: &mut Stream) -> Option<String> {
        Some(self.first(stream))
    }

    fn last_name(&self, stream: &mut Stream) -> Option<String> {
        Some(self.last(stream))
    }

    fn company_name(&self, stream: &mut Stream) -> Option<String> {
        Some(self.company(stream))
    }
}

/// Ordered list of providers queried in sequence, ending in [`FixedNames`].
#[derive(Clone, Default)]
pub struct NameChain {
    providers: Vec<Arc<dyn NameProvider>>,
}

impl NameChain {
    /// Creates a chain from the most specific provider to the least.
    pub fn new(providers: Vec<Arc<dyn NameProvider>>) -> Self {
        Self { providers }
    }

    /// Number of providers ahead of the fixed fallback.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if only the fixed fallback remains.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn first_name(&self, stream: &mut Stream) -> String {
        self.providers
            .iter()
            .find_map(|p| p.first_name(stream))
            .unwrap_or_else(|| FixedNames.first(stream))
    }

    pub fn last_name(&self, stream: &mut Stream) -> String {
        self.providers
            .iter()
            .find_map(|p| p.last_name(stream))
            .unwrap_or_else(|| FixedNames.last(stream))
    }

    pub fn company_name(&self, stream: &mut Stream) -> String {
        self.providers
            .iter()
            .find_map(|p| p.company_name(stream))
            .unwrap_or_else(|| FixedNames.company(stream))
    }
}

impl std::fmt::Debug for NameChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameChain")
            .field("providers", &self.providers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{derive_stream, Seed};

    fn own(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn table(first: &[&str], last: &[&str], companies: &[&str]) -> NameTable {
        NameTable {
            first_names: own(first),
            last_names: own(last),
            companies: own(companies),
        }
    }

    #[test]
    fn empty_chain_uses_fixed_lists() {
        let chain = NameChain::default();
        let mut stream = derive_stream(Seed::from(1), 1);
        let first = chain.first_name(&mut stream);
        let last = chain.last_name(&mut stream);
        assert!(FALLBACK_FIRST.contains(&first.as_str()));
        assert!(FALLBACK_LAST.contains(&last.as_str()));
    }

    #[test]
    fn company_fallback_is_gmbh() {
        let chain = NameChain::default();
        let mut stream = derive_stream(Seed::from(3), 3);
        let company = chain.company_name(&mut stream);
        assert!(company.ends_with(" GmbH"));
    }

    #[test]
    fn region_answers_before_generic() {
        let region: Arc<dyn NameProvider> = Arc::new(table(&["Jürgen"], &[], &[]));
        let generic: Arc<dyn NameProvider> = Arc::new(table(&["John"], &["Smith"], &[]));
        let chain = NameChain::new(vec![region, generic]);
        let mut stream = derive_stream(Seed::from(7), 0);

        assert_eq!(chain.first_name(&mut stream), "Jürgen");
        // Region has no last names; generic answers.
        assert_eq!(chain.last_name(&mut stream), "Smith");
    }

    #[test]
    fn absent_levels_consume_no_draws() {
        let empty: Arc<dyn NameProvider> = Arc::new(NameTable::default());
        let chain = NameChain::new(vec![empty]);
        let mut with_chain = derive_stream(Seed::from(9), 2);
        let mut bare = with_chain.clone();

        let a = chain.first_name(&mut with_chain);
        let b = FixedNames.first(&mut bare);
        assert_eq!(a, b);
        assert_eq!(with_chain, bare);
    }

    #[test]
    fn bank_without_names_is_absent() {
        let bank = LocaleBank::from_json(
            "xx",
            r#"{"title_words":{"adjectives":["a"],"nouns":["b"],"suffixes":["c"]},
                "genres":["g"],"review_phrases":["r"]}"#,
        )
        .unwrap();
        let mut stream = derive_stream(Seed::from(1), 1);
        assert!(bank.first_name(&mut stream).is_none());
        assert!(bank.company_name(&mut stream).is_none());
    }
}
