//! SMTP notifier
//!
//! Authenticated delivery over a TLS-required transport to a single recipient.

use super::{Notifier, NotifyError};
use crate::config::{EmailConfig, SmtpSecurity};
use async_trait::async_trait;
use lettre::address::Address;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Sender, recipient and subject shared by every alert
#[derive(Debug, Clone)]
pub struct MailEnvelope {
    from: Mailbox,
    to: Mailbox,
    subject: String,
}

impl MailEnvelope {
    /// Parse the configured addresses
    pub fn from_config(config: &EmailConfig) -> Result<Self, NotifyError> {
        let from = parse_address("sender", &config.from_email)?;
        let to = parse_address("recipient", &config.to_email)?;

        Ok(Self {
            from: Mailbox::new(config.from_display_name.clone(), from),
            to: Mailbox::new(None, to),
            subject: config.subject.clone(),
        })
    }

    /// Build a plain-text message with the given body
    pub fn build_message(&self, body: &str) -> Result<Message, NotifyError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(self.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;
        Ok(message)
    }
}

fn parse_address(field: &'static str, value: &str) -> Result<Address, NotifyError> {
    value
        .trim()
        .parse()
        .map_err(|source| NotifyError::Address { field, source })
}

/// Email notifier backed by an async SMTP transport
pub struct SmtpNotifier {
    envelope: MailEnvelope,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotifier {
    /// Create a notifier from configuration
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: &EmailConfig) -> Result<Self, NotifyError> {
        let envelope = MailEnvelope::from_config(config)?;

        let builder = match config.security {
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            }
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?,
        };

        let transport = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.from_email.clone(),
                config.from_password.clone(),
            ))
            .build();

        tracing::debug!(
            host = %config.smtp_host,
            port = config.smtp_port,
            security = ?config.security,
            "SMTP notifier configured"
        );

        Ok(Self {
            envelope,
            transport,
        })
    }

    pub fn envelope(&self) -> &MailEnvelope {
        &self.envelope
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_alert(&self, body: &str) -> Result<(), NotifyError> {
        let message = self.envelope.build_message(body)?;
        let response = self.transport.send(message).await?;

        tracing::info!(
            to = %self.envelope.to,
            code = %response.code(),
            "Alert email sent"
        );

        Ok(())
    }
}
