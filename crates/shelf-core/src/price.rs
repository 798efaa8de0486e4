//! Price type for displaying catalog amounts.
//!
//! The catalog service sends prices as plain JSON numbers in a single,
//! implicit currency (baht). `Price` wraps that number and owns the display
//! rules: whole amounts are shown without decimals, anything else with two.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Symbol shown in front of every price.
pub const CURRENCY_SYMBOL: &str = "\u{0e3f}";

/// A non-negative catalog amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Create a new price.
    pub fn new(amount: f64) -> Self {
        Self(amount)
    }

    /// Get the raw amount.
    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Whether the amount is a whole number.
    pub fn is_whole(&self) -> bool {
        self.0.fract() == 0.0
    }

    /// Format the amount without the currency symbol.
    pub fn format_amount(&self) -> String {
        if self.is_whole() {
            format!("{:.0}", self.0)
        } else {
            format!("{:.2}", self.0)
        }
    }

    /// Format for display (e.g., "฿299").
    pub fn display(&self) -> String {
        format!("{}{}", CURRENCY_SYMBOL, self.format_amount())
    }

    /// Total order over amounts, usable by stable sorts.
    pub fn total_cmp(&self, other: &Price) -> Ordering {
        self.0.total_cmp(&other.0)
    }

    /// Percentage saved relative to an original price, rounded to the
    /// nearest whole percent. `None` when there is no saving.
    pub fn savings_percent(&self, original: Price) -> Option<u8> {
        if original.0 > self.0 && original.0 > 0.0 {
            let pct = ((original.0 - self.0) / original.0 * 100.0).round();
            Some(pct.clamp(0.0, 100.0) as u8)
        } else {
            None
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<f64> for Price {
    fn from(amount: f64) -> Self {
        Self(amount)
    }
}
