//! Alert message formatting

use crate::quote::Quote;
use std::fmt::Display;

/// Format the price alert body
///
/// Decimals keep their decoded representation (`91000`, `0.55`).
pub fn format_price_alert(asset_name: &str, quote: &Quote) -> String {
    format!(
        "Current {} Price: ${}$, Change: {}$ ({}%). Today's Range: ${} - ${}",
        asset_name,
        quote.current_price,
        quote.change,
        quote.percent_change,
        quote.low_price,
        quote.high_price
    )
}

/// Format the body sent when a price check fails
pub fn format_failure_alert(error: &dyn Display) -> String {
    format!("Price check failed: {}", error)
}
