//! CLI interface for price-alert
//!
//! Provides subcommands for:
//! - `run`: Host the job on its cron schedule
//! - `check`: Run one price check now
//! - `config`: Show the effective configuration

mod check;
mod run;

pub use check::CheckArgs;
pub use run::RunArgs;

use crate::alert::ThresholdRule;
use crate::config::Config;
use crate::job::PriceCheckJob;
use crate::notify::SmtpNotifier;
use crate::quote::{QuoteClient, QuoteClientConfig};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "price-alert")]
#[command(about = "Scheduled price checker that emails an alert when a quote crosses a threshold")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file (optional; PRICE_ALERT_* variables override it)
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the price check on the configured schedule
    Run(RunArgs),
    /// Run a single price check now
    Check(CheckArgs),
    /// Show the effective configuration (secrets redacted)
    Config,
}

/// Production job wired from configuration
pub type ConfiguredJob = PriceCheckJob<QuoteClient, SmtpNotifier>;

/// Build the job from resolved configuration
///
/// Must be called inside a Tokio runtime (the SMTP pool spawns a task).
pub fn build_job(config: &Config) -> anyhow::Result<ConfiguredJob> {
    let source = QuoteClient::new(QuoteClientConfig {
        base_url: config.quote.base_url.clone(),
        symbol: config.quote.symbol.clone(),
        api_key: config.quote.api_key.clone(),
    });
    let notifier = SmtpNotifier::new(&config.email)?;
    let rule = ThresholdRule::new(config.threshold()?);

    Ok(PriceCheckJob::new(
        source,
        notifier,
        rule,
        config.alert.asset_name.clone(),
    ))
}

/// Render configuration for display with secrets masked
pub fn describe_config(config: &Config) -> String {
    let threshold = config
        .alert
        .threshold
        .map(|t| t.to_string())
        .unwrap_or_else(|| "<unset>".to_string());

    let lines = [
        format!("  Quote: {} {}", config.quote.base_url, config.quote.symbol),
        format!("  API key: {}", redact(&config.quote.api_key)),
        format!("  Alert: {} above {}", config.alert.asset_name, threshold),
        format!(
            "  SMTP: {}:{} ({:?})",
            config.email.smtp_host, config.email.smtp_port, config.email.security
        ),
        format!(
            "  From: {}{}",
            config.email.from_email,
            config
                .email
                .from_display_name
                .as_ref()
                .map(|n| format!(" ({})", n))
                .unwrap_or_default()
        ),
        format!("  Password: {}", redact(&config.email.from_password)),
        format!("  To: {}", config.email.to_email),
        format!("  Subject: {}", config.email.subject),
        format!(
            "  Schedule: {} ({:?})",
            config.schedule.cron, config.schedule.timezone
        ),
        format!(
            "  Logging: {} ({:?})",
            config.telemetry.log_level, config.telemetry.log_format
        ),
    ];

    lines.join("\n")
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "********"
    }
}
