//! Quote types

use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;
use thiserror::Error;

/// A price snapshot decoded from one quote API response
///
/// Wire keys are the provider's short names (`c`, `d`, `dp`, `h`, `l`, `o`, `pc`, `t`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Quote {
    /// Last traded price
    #[serde(rename = "c", deserialize_with = "json_number")]
    pub current_price: Decimal,
    /// Absolute change from previous close
    #[serde(rename = "d", deserialize_with = "json_number")]
    pub change: Decimal,
    /// Percent change from previous close
    #[serde(rename = "dp", deserialize_with = "json_number")]
    pub percent_change: Decimal,
    /// Session high
    #[serde(rename = "h", deserialize_with = "json_number")]
    pub high_price: Decimal,
    /// Session low
    #[serde(rename = "l", deserialize_with = "json_number")]
    pub low_price: Decimal,
    /// Session open
    #[serde(rename = "o", deserialize_with = "json_number")]
    pub open_price: Decimal,
    /// Prior session close
    #[serde(rename = "pc", deserialize_with = "json_number")]
    pub previous_close: Decimal,
    /// Quote time, seconds since epoch
    #[serde(rename = "t")]
    pub timestamp: i64,
}

/// Decode a JSON number exactly as written; strings and `null` are rejected
fn json_number<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(D::Error::custom)
}

/// Errors raised while fetching or decoding a quote
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The request never produced a response (connect, TLS, body read)
    #[error("quote request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The API answered with a non-success status
    #[error("quote API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The body was not a JSON object with all numeric quote fields
    #[error("failed to decode quote: {0}")]
    Decode(#[from] serde_json::Error),
}

// reqwest errors carry the request URL, which includes the API token
impl From<reqwest::Error> for QuoteError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.without_url())
    }
}

impl QuoteError {
    /// True for transport failures and non-success statuses
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { .. })
    }

    /// True when the response arrived but could not be decoded
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
