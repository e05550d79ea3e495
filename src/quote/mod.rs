//! Quote module
//!
//! Fetches a single price quote for the monitored symbol from the quote API

mod client;
mod types;

pub use client::{decode_quote, QuoteClient, QuoteClientConfig, DEFAULT_QUOTE_API_URL};
pub use types::{Quote, QuoteError};

use async_trait::async_trait;

/// Trait for quote source implementations
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the current quote for the configured symbol
    async fn fetch_quote(&self) -> Result<Quote, QuoteError>;
}
