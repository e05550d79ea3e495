//! Configuration types for price-alert
//!
//! Resolved once at startup: TOML file first, then `PRICE_ALERT_*`
//! environment variables, then validation.

use crate::quote::DEFAULT_QUOTE_API_URL;
use crate::telemetry::LogFormat;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub quote: QuoteConfig,
    #[serde(default)]
    pub alert: AlertConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Quote API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteConfig {
    #[serde(default = "default_quote_url")]
    pub base_url: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_quote_url() -> String {
    DEFAULT_QUOTE_API_URL.to_string()
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_quote_url(),
            symbol: String::new(),
            api_key: String::new(),
        }
    }
}

/// Alert rule configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfig {
    /// Alert when the current price is strictly above this value
    pub threshold: Option<Decimal>,

    /// Asset name used in the alert text
    #[serde(default = "default_asset_name")]
    pub asset_name: String,
}

fn default_asset_name() -> String {
    "Bitcoin".to_string()
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            threshold: None,
            asset_name: default_asset_name(),
        }
    }
}

/// SMTP transport security; both modes require TLS
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// Plain connect, then mandatory STARTTLS upgrade
    #[default]
    StartTls,
    /// TLS from the first byte (SMTPS)
    Tls,
}

impl FromStr for SmtpSecurity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "starttls" => Ok(Self::StartTls),
            "tls" => Ok(Self::Tls),
            other => Err(format!("expected \"starttls\" or \"tls\", got {:?}", other)),
        }
    }
}

/// Outbound email configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub security: SmtpSecurity,
    /// Sender address, also the SMTP login
    #[serde(default)]
    pub from_email: String,
    pub from_display_name: Option<String>,
    #[serde(default)]
    pub from_password: String,
    #[serde(default)]
    pub to_email: String,
    #[serde(default = "default_subject")]
    pub subject: String,
}

fn default_smtp_port() -> u16 {
    587
}
fn default_subject() -> String {
    "Bitcoin Price".to_string()
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            security: SmtpSecurity::default(),
            from_email: String::new(),
            from_display_name: None,
            from_password: String::new(),
            to_email: String::new(),
            subject: default_subject(),
        }
    }
}

/// Time zone used to interpret the cron expression
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleTimezone {
    #[default]
    Utc,
    Local,
}

impl FromStr for ScheduleTimezone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utc" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            other => Err(format!("expected \"utc\" or \"local\", got {:?}", other)),
        }
    }
}

/// Trigger schedule configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Six-field cron expression: sec min hour day month weekday
    #[serde(default = "default_cron")]
    pub cron: String,
    #[serde(default)]
    pub timezone: ScheduleTimezone,
}

fn default_cron() -> String {
    "0 0 9 * * *".to_string()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cron: default_cron(),
            timezone: ScheduleTimezone::default(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Layer the file (if present) and the process environment without validating
    pub fn resolve(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };

        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Resolve and validate configuration
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::resolve(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Override settings from environment-style lookups
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |var: &str, target: &mut String| {
            if let Some(value) = lookup(var) {
                *target = value;
            }
        };

        string("PRICE_ALERT_QUOTE_URL", &mut self.quote.base_url);
        string("PRICE_ALERT_SYMBOL", &mut self.quote.symbol);
        string("PRICE_ALERT_API_KEY", &mut self.quote.api_key);
        string("PRICE_ALERT_ASSET_NAME", &mut self.alert.asset_name);
        string("PRICE_ALERT_SMTP_HOST", &mut self.email.smtp_host);
        string("PRICE_ALERT_FROM_EMAIL", &mut self.email.from_email);
        string("PRICE_ALERT_FROM_PASSWORD", &mut self.email.from_password);
        string("PRICE_ALERT_TO_EMAIL", &mut self.email.to_email);
        string("PRICE_ALERT_SUBJECT", &mut self.email.subject);
        string("PRICE_ALERT_SCHEDULE", &mut self.schedule.cron);
        string("PRICE_ALERT_LOG_LEVEL", &mut self.telemetry.log_level);

        if let Some(name) = lookup("PRICE_ALERT_FROM_DISPLAY_NAME") {
            self.email.from_display_name = Some(name).filter(|n| !n.is_empty());
        }
        if let Some(value) = lookup("PRICE_ALERT_THRESHOLD") {
            self.alert.threshold = Some(parse_env("PRICE_ALERT_THRESHOLD", &value)?);
        }
        if let Some(value) = lookup("PRICE_ALERT_SMTP_PORT") {
            self.email.smtp_port = parse_env("PRICE_ALERT_SMTP_PORT", &value)?;
        }
        if let Some(value) = lookup("PRICE_ALERT_SMTP_SECURITY") {
            self.email.security = parse_env("PRICE_ALERT_SMTP_SECURITY", &value)?;
        }
        if let Some(value) = lookup("PRICE_ALERT_TIMEZONE") {
            self.schedule.timezone = parse_env("PRICE_ALERT_TIMEZONE", &value)?;
        }
        if let Some(value) = lookup("PRICE_ALERT_LOG_FORMAT") {
            self.telemetry.log_format = parse_env("PRICE_ALERT_LOG_FORMAT", &value)?;
        }

        Ok(())
    }

    /// Check that every required setting is present and well-formed
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("quote.base_url", &self.quote.base_url),
            ("quote.symbol", &self.quote.symbol),
            ("quote.api_key", &self.quote.api_key),
            ("email.smtp_host", &self.email.smtp_host),
            ("email.from_email", &self.email.from_email),
            ("email.from_password", &self.email.from_password),
            ("email.to_email", &self.email.to_email),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(key));
            }
        }

        self.threshold()?;

        if self.email.smtp_port == 0 {
            return Err(ConfigError::Invalid {
                key: "email.smtp_port",
                reason: "port must be non-zero".to_string(),
            });
        }

        cron::Schedule::from_str(&self.schedule.cron).map_err(|e| ConfigError::Invalid {
            key: "schedule.cron",
            reason: e.to_string(),
        })?;

        Ok(())
    }

    /// The configured alert threshold
    pub fn threshold(&self) -> Result<Decimal, ConfigError> {
        self.alert
            .threshold
            .ok_or(ConfigError::Missing("alert.threshold"))
    }
}

fn parse_env<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnv {
            var,
            reason: e.to_string(),
        })
}
