//! Price feed collaborators.
//!
//! A feed is asked for quotes exactly once per session start. Transport
//! failures and undecodable bodies both surface as `FeedUnavailable`.

use crate::errors::{AppError, Result};
use crate::models::TokenQuote;
use async_trait::async_trait;

pub mod http;

pub use http::HttpPriceFeed;

#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn fetch(&self) -> Result<Vec<TokenQuote>>;
}

/// Decode the feed wire format (JSON array of `{currency, date, price}`).
pub fn decode_quotes(body: &str) -> Result<Vec<TokenQuote>> {
    serde_json::from_str(body)
        .map_err(|e| AppError::FeedUnavailable(format!("malformed price response: {e}")))
}

/// In-memory feed, used for offline runs and tests.
#[derive(Debug, Clone)]
pub struct StaticPriceFeed {
    quotes: Option<Vec<TokenQuote>>,
}

impl StaticPriceFeed {
    pub fn new(quotes: Vec<TokenQuote>) -> Self {
        Self {
            quotes: Some(quotes),
        }
    }

    pub fn from_json(body: &str) -> Result<Self> {
        Ok(Self::new(decode_quotes(body)?))
    }

    /// A feed whose every fetch fails.
    pub fn failing() -> Self {
        Self { quotes: None }
    }
}

#[async_trait]
impl PriceFeed for StaticPriceFeed {
    async fn fetch(&self) -> Result<Vec<TokenQuote>> {
        self.quotes
            .clone()
            .ok_or_else(|| AppError::FeedUnavailable("static feed configured to fail".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_format() {
        let raw = r#"[
            {"currency":"ETH","date":"2023-08-29T07:10:52.000Z","price":1645.93},
            {"currency":"USDC","date":"2023-08-29T07:10:30.000Z","price":0.99}
        ]"#;
        let quotes = decode_quotes(raw).expect("json should parse");
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].symbol, "ETH");
        assert_eq!(quotes[0].unit_price_usd, 1645.93);
        assert_eq!(quotes[1].as_of.to_rfc3339(), "2023-08-29T07:10:30+00:00");
    }

    #[test]
    fn malformed_body_is_feed_unavailable() {
        let err = decode_quotes(r#"{"not":"a list"}"#).unwrap_err();
        assert!(matches!(err, AppError::FeedUnavailable(_)));
        let bad_date = r#"[{"currency":"ETH","date":"yesterday","price":1}]"#;
        let err = decode_quotes(bad_date).unwrap_err();
        assert!(matches!(err, AppError::FeedUnavailable(_)));
    }

    #[tokio::test]
    async fn failing_static_feed_errors() {
        let err = StaticPriceFeed::failing().fetch().await.unwrap_err();
        assert!(matches!(err, AppError::FeedUnavailable(_)));
    }

    #[tokio::test]
    async fn static_feed_returns_quotes_in_order() {
        let feed = StaticPriceFeed::from_json(
            r#"[{"currency":"B","date":"2023-08-29T07:10:52Z","price":2},
                {"currency":"A","date":"2023-08-29T07:10:52Z","price":1}]"#,
        )
        .unwrap();
        let quotes = feed.fetch().await.unwrap();
        let symbols: Vec<_> = quotes.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["B", "A"]);
    }
}
