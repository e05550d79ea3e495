//! price-alert: scheduled price threshold alerts by email
//!
//! This library provides:
//! - A quote API client decoding short-key JSON quotes
//! - A fixed-threshold alert rule
//! - An SMTP notifier with mandatory TLS
//! - A scheduled job with a pluggable clock trigger
//! - Layered configuration and structured logging

pub mod alert;
pub mod cli;
pub mod config;
pub mod job;
pub mod notify;
pub mod quote;
pub mod telemetry;
