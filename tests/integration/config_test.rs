//! Integration tests for configuration loading

use price_alert::config::{Config, ConfigError, SmtpSecurity};
use rust_decimal_macros::dec;
use std::io::Write;

const EXAMPLE: &str = include_str!("../../config.toml.example");

#[test]
fn test_example_config_parses_and_validates() {
    let config: Config = toml::from_str(EXAMPLE).unwrap();
    assert_eq!(config.schedule.cron, "0 0 9 * * *");
    assert_eq!(config.alert.threshold, Some(dec!(90000)));
    assert_eq!(config.email.security, SmtpSecurity::StartTls);
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(EXAMPLE.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.quote.symbol, "BINANCE:BTCUSDT");
    assert_eq!(config.email.to_email, "me@example.com");
}

#[test]
fn test_from_file_invalid_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[alert\nthreshold = ").unwrap();

    let result = Config::from_file(file.path());
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_file_then_env_layering() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(EXAMPLE.as_bytes()).unwrap();

    let mut config = Config::from_file(file.path()).unwrap();
    config
        .apply_env(|var| match var {
            "PRICE_ALERT_THRESHOLD" => Some("65000".to_string()),
            "PRICE_ALERT_TO_EMAIL" => Some("ops@example.com".to_string()),
            _ => None,
        })
        .unwrap();
    config.validate().unwrap();

    assert_eq!(config.threshold().unwrap(), dec!(65000));
    assert_eq!(config.email.to_email, "ops@example.com");
    assert_eq!(config.quote.symbol, "BINANCE:BTCUSDT");
}

#[test]
fn test_incomplete_file_resolves_for_display() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[quote]\nsymbol = \"BINANCE:BTCUSDT\"\n").unwrap();

    let config = Config::resolve(file.path()).unwrap();
    assert!(config.validate().is_err());

    let text = price_alert::cli::describe_config(&config);
    assert!(text.contains("BINANCE:BTCUSDT"));
    assert!(text.contains("above <unset>"));
}
