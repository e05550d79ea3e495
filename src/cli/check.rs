//! Check command implementation

use crate::config::Config;
use crate::job::JobOutcome;
use clap::Args;

#[derive(Args, Debug)]
pub struct CheckArgs {}

impl CheckArgs {
    /// Run one invocation; an escaping job error becomes a non-zero exit
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let job = super::build_job(config)?;
        let outcome = job.run().await?;

        let threshold = job.rule().threshold();
        match outcome {
            JobOutcome::Idle { price } => {
                println!("No alert: price {} is not above {}", price, threshold)
            }
            JobOutcome::Alerted { price } => {
                println!("Alert sent: price {} is above {}", price, threshold)
            }
            JobOutcome::FailureReported { error } => {
                println!("Price check failed, failure alert sent: {}", error)
            }
            JobOutcome::Skipped => println!("Skipped: another check is running"),
        }

        Ok(())
    }
}
