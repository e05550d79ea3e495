//! Job outcome and error types

use crate::notify::NotifyError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Terminal state of one job invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Quote fetched, threshold not exceeded
    Idle { price: Decimal },
    /// Quote fetched, threshold exceeded, alert sent
    Alerted { price: Decimal },
    /// Fetch or decode failed and the failure was emailed instead
    FailureReported { error: String },
    /// Another invocation was still running
    Skipped,
}

/// Errors that escape a job invocation
///
/// Quote errors never appear here: they are reported by email.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Failed to send price alert: {0}")]
    Alert(#[source] NotifyError),

    #[error("Price check failed ({cause}) and the failure alert could not be sent: {source}")]
    FailureAlert { cause: String, source: NotifyError },
}
