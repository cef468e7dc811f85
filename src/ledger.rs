//! Read-only balance lookup injected into validation.

use crate::errors::{AppError, Result};
use std::collections::HashMap;

/// Symbol to available balance. Swaps never mutate it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceLedger {
    balances: HashMap<String, f64>,
}

impl BalanceLedger {
    /// Balances must be finite and non-negative.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut balances = HashMap::new();
        for (symbol, amount) in entries {
            let symbol = symbol.into();
            if !amount.is_finite() || amount < 0.0 {
                return Err(AppError::InvalidBalance { symbol, amount });
            }
            balances.insert(symbol, amount);
        }
        Ok(Self { balances })
    }

    /// The wallet shown by the swap form.
    pub fn demo() -> Self {
        let balances = [
            ("ETH", 10.5),
            ("USDC", 245.8),
            ("WBTC", 0.025),
            ("BLUR", 1200.0),
            ("GMX", 5.2),
            ("ATOM", 150.0),
            ("OSMO", 890.0),
            ("OKB", 15.8),
            ("OKT", 45.2),
            ("ZIL", 5000.0),
        ]
        .into_iter()
        .map(|(s, b)| (s.to_string(), b))
        .collect();
        Self { balances }
    }

    pub fn balance_of(&self, symbol: &str) -> Option<f64> {
        self.balances.get(symbol).copied()
    }

    /// Balance badge value; unknown tokens show as zero.
    pub fn display_balance(&self, symbol: &str) -> f64 {
        self.balance_of(symbol).unwrap_or(0.0)
    }
}
