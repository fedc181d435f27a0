//! Check-in scheduling.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use cron::Schedule;

use crate::context::SessionContext;
use crate::error::ToolError;
use crate::tools::{CheckinSchedule, CheckinScheduler};

// 09:00 UTC, daily or every Monday.
const DAILY_EXPR: &str = "0 0 9 * * *";
const WEEKLY_EXPR: &str = "0 0 9 * * Mon";

/// Cron-backed check-in scheduler.
///
/// A request mentioning "daily" or "every day" gets a daily cadence;
/// everything else defaults to weekly.
pub struct CronCheckinScheduler {
    /// How many upcoming check-ins to report.
    count: usize,
}

impl CronCheckinScheduler {
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl Default for CronCheckinScheduler {
    fn default() -> Self {
        Self::new(4)
    }
}

#[async_trait]
impl CheckinScheduler for CronCheckinScheduler {
    async fn schedule(
        &self,
        input: &str,
        _ctx: &SessionContext,
    ) -> Result<CheckinSchedule, ToolError> {
        let lowered = input.to_lowercase();
        let (cadence, expr) = if lowered.contains("daily") || lowered.contains("every day") {
            ("daily", DAILY_EXPR)
        } else {
            ("weekly", WEEKLY_EXPR)
        };

        let schedule = Schedule::from_str(expr).map_err(|e| ToolError::ExecutionFailed {
            name: "checkin_scheduler".to_string(),
            reason: format!("invalid cron expression {expr}: {e}"),
        })?;

        let upcoming: Vec<_> = schedule.upcoming(Utc).take(self.count).collect();
        tracing::info!(cadence, count = upcoming.len(), "Check-ins scheduled");
        Ok(CheckinSchedule {
            cadence: cadence.to_string(),
            upcoming,
        })
    }
}
