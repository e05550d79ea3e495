//! Threshold alert evaluation

use crate::quote::Quote;
use rust_decimal::Decimal;

/// True when the quote's current price is strictly above the threshold
pub fn should_alert(quote: &Quote, threshold: Decimal) -> bool {
    quote.current_price > threshold
}

/// Fixed upper-bound rule applied to every fetched quote
///
/// There is no hysteresis: every evaluation above the bound alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdRule {
    threshold: Decimal,
}

impl ThresholdRule {
    pub fn new(threshold: Decimal) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    /// Evaluate a quote against the configured threshold
    pub fn should_alert(&self, quote: &Quote) -> bool {
        should_alert(quote, self.threshold)
    }
}
