//! Shared data structures used throughout the swap pipeline.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single token price as published by the price feed.
///
/// Field names follow the feed wire format (`currency`, `date`, `price`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenQuote {
    #[serde(rename = "currency")]
    pub symbol: String,
    #[serde(rename = "date")]
    pub as_of: DateTime<Utc>,
    #[serde(rename = "price")]
    pub unit_price_usd: f64,
}

impl TokenQuote {
    pub fn new(symbol: impl Into<String>, as_of: DateTime<Utc>, unit_price_usd: f64) -> Self {
        Self {
            symbol: symbol.into(),
            as_of,
            unit_price_usd,
        }
    }
}

/// Snapshot of what the user is asking to swap. Rebuilt on every change.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapRequest {
    pub source_token: Option<TokenQuote>,
    pub dest_token: Option<TokenQuote>,
    /// Raw text as typed by the user.
    pub source_amount: String,
}

impl SwapRequest {
    pub fn source_symbol(&self) -> Option<&str> {
        self.source_token.as_ref().map(|t| t.symbol.as_str())
    }

    pub fn dest_symbol(&self) -> Option<&str> {
        self.dest_token.as_ref().map(|t| t.symbol.as_str())
    }
}

/// Derived destination amount for the current inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapQuote {
    /// source price / destination price
    pub rate: f64,
    /// Destination amount, 8 fractional digits when priced.
    pub dest_amount: BigDecimal,
    pub computed_at: DateTime<Utc>,
}

impl SwapQuote {
    /// Fixed-point rendering used for the destination amount field.
    pub fn dest_amount_text(&self) -> String {
        self.dest_amount.to_plain_string()
    }
}
