use crate::models::{SwapQuote, TokenQuote};
use crate::utils::{parse_amount, round_fixed, to_fixed};
use chrono::Utc;
use tracing::warn;

/// Fractional digits of the destination amount field.
pub const DEST_AMOUNT_DECIMALS: i64 = 8;
/// Fractional digits of the displayed exchange rate.
pub const RATE_DISPLAY_DECIMALS: i64 = 6;

/// Price the swap of `source_amount_text` units of `source` into `dest`.
///
/// Returns `None` ("nothing to show yet") when either token is missing or
/// the amount does not parse to a positive number. Inputs are never mutated
/// and nothing is cached between calls.
pub fn quote(
    source: Option<&TokenQuote>,
    dest: Option<&TokenQuote>,
    source_amount_text: &str,
) -> Option<SwapQuote> {
    let (source, dest) = (source?, dest?);
    let amount = parse_amount(source_amount_text).filter(|a| *a > 0.0)?;

    let rate = source.unit_price_usd / dest.unit_price_usd;
    let Some(dest_amount) = round_fixed(amount * rate, DEST_AMOUNT_DECIMALS) else {
        warn!(
            source = %source.symbol,
            dest = %dest.symbol,
            rate,
            "[QUOTE] unusable rate, no quote produced"
        );
        return None;
    };

    Some(SwapQuote {
        rate,
        dest_amount,
        computed_at: Utc::now(),
    })
}

/// `source / dest` price ratio, `0.0` unless both tokens are selected.
pub fn exchange_rate(source: Option<&TokenQuote>, dest: Option<&TokenQuote>) -> f64 {
    match (source, dest) {
        (Some(s), Some(d)) => s.unit_price_usd / d.unit_price_usd,
        _ => 0.0,
    }
}

/// Rate as shown in the exchange info panel.
pub fn format_rate(rate: f64) -> String {
    to_fixed(rate, RATE_DISPLAY_DECIMALS).unwrap_or_else(|| rate.to_string())
}
