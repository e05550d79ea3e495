//! Quote API client
//!
//! Issues one `GET {base_url}/quote?symbol=..&token=..` per call and decodes
//! the short-key JSON body into a [`Quote`].

use super::{Quote, QuoteError, QuoteSource};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};

/// Quote API base URL
pub const DEFAULT_QUOTE_API_URL: &str = "https://finnhub.io/api/v1";

/// Configuration for the quote client
#[derive(Debug, Clone)]
pub struct QuoteClientConfig {
    /// Base URL for the quote API
    pub base_url: String,
    /// Symbol to quote (e.g., "BINANCE:BTCUSDT")
    pub symbol: String,
    /// API token sent as the `token` query parameter
    pub api_key: String,
}

impl QuoteClientConfig {
    pub fn new(symbol: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_QUOTE_API_URL.to_string(),
            symbol: symbol.into(),
            api_key: api_key.into(),
        }
    }
}

/// Client for the quote API
pub struct QuoteClient {
    config: QuoteClientConfig,
    client: Client,
}

impl QuoteClient {
    /// Create a new client; the transport keeps reqwest's default timeouts
    pub fn new(config: QuoteClientConfig) -> Self {
        Self::with_http_client(config, Client::new())
    }

    /// Create a client around an existing reqwest client
    pub fn with_http_client(config: QuoteClientConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Build the quote endpoint URL (query parameters are added per request)
    fn endpoint(&self) -> String {
        format!("{}/quote", self.config.base_url.trim_end_matches('/'))
    }

    /// Fetch a quote for an explicit symbol and API key
    pub async fn fetch(&self, symbol: &str, api_key: &str) -> Result<Quote, QuoteError> {
        let url = self.endpoint();

        // The token is a secret; only the endpoint and symbol are logged
        tracing::debug!(url = %url, symbol, "Fetching quote");

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol), ("token", api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, symbol, "Quote API returned an error status");
            return Err(QuoteError::Status { status, body });
        }

        let body = response.text().await?;
        let quote = decode_quote(&body)?;

        tracing::debug!(
            symbol,
            price = %quote.current_price,
            timestamp = quote.timestamp,
            "Quote received"
        );

        Ok(quote)
    }
}

#[async_trait]
impl QuoteSource for QuoteClient {
    async fn fetch_quote(&self) -> Result<Quote, QuoteError> {
        self.fetch(&self.config.symbol, &self.config.api_key).await
    }
}

/// Decode a quote body, matching the short field names case-insensitively
///
/// Every field is required. `null`, strings and missing keys are errors, so a
/// malformed body can never turn into a zero price.
pub fn decode_quote(body: &str) -> Result<Quote, QuoteError> {
    let raw: Map<String, Value> = serde_json::from_str(body)?;

    // An exact lower-case key takes precedence over its case variants
    let mut normalized = Map::new();
    for (key, value) in raw {
        let lower = key.to_lowercase();
        if key == lower || !normalized.contains_key(&lower) {
            normalized.insert(lower, value);
        }
    }

    let quote = serde_json::from_value(Value::Object(normalized))?;
    Ok(quote)
}
