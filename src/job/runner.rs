//! Scheduler loop hosting the price check job

use super::{PriceCheckJob, Trigger};
use crate::notify::Notifier;
use crate::quote::QuoteSource;

/// Run the job once per trigger tick until the trigger is exhausted
///
/// Invocations are sequential: the next fire time is computed only after the
/// previous run finished. Failed runs are logged and do not stop the loop.
/// Returns the number of completed invocations.
pub async fn run_schedule<Q, N, T>(job: &PriceCheckJob<Q, N>, trigger: &mut T) -> usize
where
    Q: QuoteSource,
    N: Notifier,
    T: Trigger,
{
    let mut runs = 0;

    while let Some(fired_at) = trigger.wait().await {
        tracing::info!(fired_at = %fired_at, "Scheduled run triggered");

        match job.run().await {
            Ok(outcome) => tracing::info!(?outcome, "Scheduled run finished"),
            Err(e) => tracing::error!(error = %e, "Scheduled run failed"),
        }

        runs += 1;
    }

    tracing::info!(runs, "Trigger exhausted, scheduler stopping");
    runs
}
