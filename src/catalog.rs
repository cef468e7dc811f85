//! Deduplicated, ordered set of token quotes available for selection.

use crate::models::TokenQuote;
use std::collections::HashSet;
use tracing::debug;

/// Symbols pinned to the top of the catalog, in this order.
pub const PINNED_SYMBOLS: [&str; 2] = ["ETH", "USDC"];

pub const DEFAULT_SOURCE: &str = "ETH";
pub const DEFAULT_DEST: &str = "USDC";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceCatalog {
    entries: Vec<TokenQuote>,
}

impl PriceCatalog {
    /// Normalize a raw feed into a catalog.
    ///
    /// First quote per symbol wins; later duplicates are dropped. `ETH` then
    /// `USDC` are moved to the front, everything else keeps feed order.
    /// Prices are not checked here.
    pub fn build(raw: impl IntoIterator<Item = TokenQuote>) -> Self {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for quote in raw {
            if quote.symbol.is_empty() {
                debug!("[CATALOG] skipping quote with empty symbol");
                continue;
            }
            if !seen.insert(quote.symbol.clone()) {
                debug!(symbol = %quote.symbol, "[CATALOG] dropping duplicate quote");
                continue;
            }
            entries.push(quote);
        }

        // sort_by_key is stable
        entries.sort_by_key(|q| pin_rank(&q.symbol));
        Self { entries }
    }

    pub fn get(&self, symbol: &str) -> Option<&TokenQuote> {
        self.entries.iter().find(|q| q.symbol == symbol)
    }

    /// Default `(source, dest)` selection: `(ETH, USDC)` when both are listed,
    /// otherwise nothing is selected.
    pub fn default_pair(&self) -> (Option<TokenQuote>, Option<TokenQuote>) {
        match (self.get(DEFAULT_SOURCE), self.get(DEFAULT_DEST)) {
            (Some(source), Some(dest)) => (Some(source.clone()), Some(dest.clone())),
            _ => (None, None),
        }
    }

    /// Case-insensitive substring match on symbols, in catalog order.
    pub fn search(&self, query: &str) -> Vec<&TokenQuote> {
        if query.is_empty() {
            return self.entries.iter().collect();
        }
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|q| q.symbol.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.entries.iter().map(|q| q.symbol.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenQuote> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn pin_rank(symbol: &str) -> usize {
    PINNED_SYMBOLS
        .iter()
        .position(|p| *p == symbol)
        .unwrap_or(PINNED_SYMBOLS.len())
}
