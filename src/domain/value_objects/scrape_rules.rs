use serde::{Deserialize, Serialize};

/// Constraints handed to the scrape service for a single crawl. Assembled
/// per configuration request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeRules {
    /// Base URL every followed link must share, e.g. `https://docs.example.com`.
    pub must_start_with: Option<String>,
    /// Treat `page#a` and `page#b` as the same page.
    pub ignore_fragments: bool,
    /// HTML tag names whose text is worth extracting.
    pub valid_selectors: Vec<String>,
}

impl ScrapeRules {
    pub fn new(
        must_start_with: Option<String>,
        ignore_fragments: bool,
        valid_selectors: Vec<String>,
    ) -> Self {
        Self {
            must_start_with,
            ignore_fragments,
            valid_selectors,
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.must_start_with.is_none() && self.valid_selectors.is_empty()
    }
}
