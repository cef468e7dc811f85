//! Configuration loader and application settings.

use crate::errors::{AppError, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_PRICE_FEED_URL: &str = "https://interview.switcheo.com/prices.json";

/// Consolidated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP endpoint serving the JSON price list.
    pub price_feed_url: Url,
    /// Local JSON file used instead of the HTTP feed when set.
    pub price_feed_file: Option<PathBuf>,
    pub feed_timeout: Duration,
    /// Simulated submission latency.
    pub submit_delay: Duration,
    /// Makes the simulated submission fail
    pub submit_should_fail: bool,
    /// Initial slippage tolerance in percent.
    pub slippage_pct: f64,
    /// Edits the driver applies once prices are loaded.
    pub swap_from: Option<String>,
    pub swap_to: Option<String>,
    pub swap_amount: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let price_feed_url = Url::parse(&env_or("PRICE_FEED_URL", DEFAULT_PRICE_FEED_URL))?;
        let price_feed_file = env_opt("PRICE_FEED_FILE").map(PathBuf::from);
        let feed_timeout = Duration::from_secs(env_parse("FEED_TIMEOUT_SECS", 10u64)?);
        let submit_delay = Duration::from_millis(env_parse("SUBMIT_DELAY_MS", 2000u64)?);
        let submit_should_fail = env_parse("SUBMIT_SHOULD_FAIL", false)?;
        let slippage_pct = env_parse("SLIPPAGE_PCT", 0.5f64)?;

        Ok(Self {
            price_feed_url,
            price_feed_file,
            feed_timeout,
            submit_delay,
            submit_should_fail,
            slippage_pct,
            swap_from: env_opt("SWAP_FROM"),
            swap_to: env_opt("SWAP_TO"),
            swap_amount: env_opt("SWAP_AMOUNT"),
        })
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.into())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env_opt(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{key} has invalid value {raw:?}"))),
        None => Ok(default),
    }
}
