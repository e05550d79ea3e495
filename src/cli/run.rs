//! Run command implementation

use crate::config::Config;
use crate::job::{run_schedule, CronTrigger};
use clap::Args;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Run one check immediately before waiting for the first scheduled time
    #[arg(long)]
    pub now: bool,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let job = super::build_job(config)?;
        let mut trigger = CronTrigger::from_config(&config.schedule)?;

        tracing::info!(
            symbol = %config.quote.symbol,
            threshold = %job.rule().threshold(),
            schedule = %config.schedule.cron,
            timezone = ?config.schedule.timezone,
            "Price alert scheduler started"
        );

        if self.now {
            match job.run().await {
                Ok(outcome) => tracing::info!(?outcome, "Initial run finished"),
                Err(e) => tracing::error!(error = %e, "Initial run failed"),
            }
        }

        tokio::select! {
            runs = run_schedule(&job, &mut trigger) => {
                tracing::info!(runs, "Scheduler finished");
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl-C, shutting down");
            }
        }

        Ok(())
    }
}
