//! Transaction settings held in session memory only.
//!
//! Slippage is displayed and carried along, but neither pricing nor
//! validation reads it.

use crate::errors::{AppError, Result};

pub const SLIPPAGE_PRESETS: [f64; 4] = [0.1, 0.5, 1.0, 3.0];
pub const DEFAULT_SLIPPAGE_PCT: f64 = 0.5;
pub const MIN_SLIPPAGE_PCT: f64 = 0.1;
pub const MAX_SLIPPAGE_PCT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapSettings {
    slippage_pct: f64,
}

impl Default for SwapSettings {
    fn default() -> Self {
        Self {
            slippage_pct: DEFAULT_SLIPPAGE_PCT,
        }
    }
}

impl SwapSettings {
    pub fn slippage_pct(&self) -> f64 {
        self.slippage_pct
    }

    pub fn set_slippage(&mut self, value: f64) -> Result<()> {
        if !(MIN_SLIPPAGE_PCT..=MAX_SLIPPAGE_PCT).contains(&value) {
            return Err(AppError::InvalidSlippage(value));
        }
        self.slippage_pct = value;
        Ok(())
    }

    /// Custom-field input. Text that does not parse, or parses to zero,
    /// resets to the default before the range check.
    pub fn set_slippage_text(&mut self, text: &str) -> Result<()> {
        let value = text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| *v != 0.0 && !v.is_nan())
            .unwrap_or(DEFAULT_SLIPPAGE_PCT);
        self.set_slippage(value)
    }

    /// Whether the current value is one of the preset buttons.
    pub fn is_preset(&self) -> bool {
        SLIPPAGE_PRESETS.contains(&self.slippage_pct)
    }
}
