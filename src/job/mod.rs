//! Scheduled price check job
//!
//! One invocation runs Fetching -> Evaluating -> (Idle | Notifying) and always
//! terminates. Fetch and decode failures are emailed as a failure alert
//! instead of a price alert; only notification failures escape as errors.

mod runner;
mod trigger;
mod types;

pub use runner::run_schedule;
pub use trigger::{CronTrigger, Trigger};
pub use types::{JobError, JobOutcome};

use crate::alert::ThresholdRule;
use crate::notify::{format_failure_alert, format_price_alert, Notifier};
use crate::quote::{QuoteError, QuoteSource};
use tokio::sync::Mutex;

/// Fetch a quote, compare it with the threshold, and email on a crossing
pub struct PriceCheckJob<Q, N> {
    source: Q,
    notifier: N,
    rule: ThresholdRule,
    asset_name: String,
    running: Mutex<()>,
}

impl<Q, N> PriceCheckJob<Q, N>
where
    Q: QuoteSource,
    N: Notifier,
{
    pub fn new(
        source: Q,
        notifier: N,
        rule: ThresholdRule,
        asset_name: impl Into<String>,
    ) -> Self {
        Self {
            source,
            notifier,
            rule,
            asset_name: asset_name.into(),
            running: Mutex::new(()),
        }
    }

    pub fn rule(&self) -> &ThresholdRule {
        &self.rule
    }

    /// Run one invocation
    ///
    /// Overlapping calls are skipped rather than queued so a dense schedule
    /// cannot send duplicate alerts.
    pub async fn run(&self) -> Result<JobOutcome, JobError> {
        let Ok(_guard) = self.running.try_lock() else {
            tracing::warn!("Previous price check still running, skipping this invocation");
            return Ok(JobOutcome::Skipped);
        };

        tracing::debug!("Fetching quote");
        let quote = match self.source.fetch_quote().await {
            Ok(quote) => quote,
            Err(e) => return self.report_failure(e).await,
        };

        let price = quote.current_price;
        let threshold = self.rule.threshold();

        if !self.rule.should_alert(&quote) {
            tracing::info!(
                price = %price,
                threshold = %threshold,
                "Price at or below threshold, no alert"
            );
            return Ok(JobOutcome::Idle { price });
        }

        tracing::info!(
            price = %price,
            threshold = %threshold,
            "Price above threshold, sending alert"
        );
        let body = format_price_alert(&self.asset_name, &quote);
        self.notifier
            .send_alert(&body)
            .await
            .map_err(JobError::Alert)?;

        Ok(JobOutcome::Alerted { price })
    }

    /// Email a fetch/decode failure in place of the price alert
    async fn report_failure(&self, error: QuoteError) -> Result<JobOutcome, JobError> {
        let cause = error.to_string();
        tracing::error!(
            error = %cause,
            network = error.is_network(),
            decode = error.is_decode(),
            "Price check failed, sending failure alert"
        );

        let body = format_failure_alert(&error);
        match self.notifier.send_alert(&body).await {
            Ok(()) => Ok(JobOutcome::FailureReported { error: cause }),
            Err(source) => {
                tracing::error!(error = %source, "Failure alert could not be sent");
                Err(JobError::FailureAlert { cause, source })
            }
        }
    }
}
