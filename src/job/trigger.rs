//! Clock triggers for the scheduled job

use crate::config::{ConfigError, ScheduleConfig, ScheduleTimezone};
use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use cron::Schedule;
use std::str::FromStr;
use std::time::Duration;

/// Source of clock events that start a job invocation
#[async_trait]
pub trait Trigger: Send {
    /// Wait for the next fire time; `None` once the trigger is exhausted
    async fn wait(&mut self) -> Option<DateTime<Utc>>;
}

/// Cron-expression trigger (six fields: sec min hour day month weekday)
pub struct CronTrigger {
    schedule: Schedule,
    timezone: ScheduleTimezone,
    last_fired: Option<DateTime<Utc>>,
}

impl CronTrigger {
    /// Parse a cron expression evaluated in the given time zone
    pub fn new(expression: &str, timezone: ScheduleTimezone) -> Result<Self, ConfigError> {
        let schedule = Schedule::from_str(expression).map_err(|e| ConfigError::Invalid {
            key: "schedule.cron",
            reason: e.to_string(),
        })?;
        Ok(Self {
            schedule,
            timezone,
            last_fired: None,
        })
    }

    pub fn from_config(config: &ScheduleConfig) -> Result<Self, ConfigError> {
        Self::new(&config.cron, config.timezone)
    }

    /// First fire time strictly after `now`
    pub fn next_after(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.timezone {
            ScheduleTimezone::Utc => self.schedule.after(&now).next(),
            ScheduleTimezone::Local => self
                .schedule
                .after(&now.with_timezone(&Local))
                .next()
                .map(|t| t.with_timezone(&Utc)),
        }
    }

    /// Next fire time, never at or before the previous one
    ///
    /// The wall clock may still read earlier than the last slot when the sleep
    /// ends (clock steps), so the search starts from the later of the two.
    pub fn upcoming(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let from = self.last_fired.map_or(now, |last| last.max(now));
        self.next_after(from)
    }
}

#[async_trait]
impl Trigger for CronTrigger {
    async fn wait(&mut self) -> Option<DateTime<Utc>> {
        let next = self.upcoming(Utc::now())?;
        let delay = (next - Utc::now()).to_std().unwrap_or(Duration::ZERO);

        tracing::info!(next_run = %next, "Waiting for next scheduled run");
        tokio::time::sleep(delay).await;

        self.last_fired = Some(next);
        Some(next)
    }
}
