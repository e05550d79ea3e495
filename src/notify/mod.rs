//! Notification module
//!
//! Formats alert text and delivers it by email

mod message;
mod smtp;

pub use message::{format_failure_alert, format_price_alert};
pub use smtp::{MailEnvelope, SmtpNotifier};

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while building or sending a notification
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Invalid {field} address: {source}")]
    Address {
        field: &'static str,
        source: lettre::address::AddressError,
    },

    #[error("Failed to build email: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Trait for alert delivery implementations
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send one plain-text alert body
    async fn send_alert(&self, body: &str) -> Result<(), NotifyError>;
}
