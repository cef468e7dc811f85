//! Miscellaneous helper utilities.

use bigdecimal::{BigDecimal, RoundingMode};
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize `tracing` subscriber with env-based filter.
///
/// If `RUST_LOG` is not set, defaults to `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Parse user-typed amount text. Surrounding whitespace is ignored; anything
/// that is not a finite decimal number yields `None`.
pub fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round to `places` fractional digits, ties away from zero, using the exact
/// binary value of `value`.
pub fn round_fixed(value: f64, places: i64) -> Option<BigDecimal> {
    BigDecimal::try_from(value)
        .ok()
        .map(|d| d.with_scale_round(places, RoundingMode::HalfUp))
}

/// `value` with exactly `places` fractional digits, or `None` when `value`
/// is not finite.
pub fn to_fixed(value: f64, places: i64) -> Option<String> {
    round_fixed(value, places).map(|d| d.to_plain_string())
}
