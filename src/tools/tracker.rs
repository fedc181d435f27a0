//! Progress tracking.

use async_trait::async_trait;
use chrono::Utc;

use crate::context::{ProgressRecord, SessionContext};
use crate::error::ToolError;
use crate::tools::ProgressTracker;

/// Records progress reports as timestamped key/value events.
pub struct ProgressLog;

impl ProgressLog {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProgressLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressTracker for ProgressLog {
    async fn track(
        &self,
        input: &str,
        ctx: &SessionContext,
    ) -> Result<ProgressRecord, ToolError> {
        if input.trim().is_empty() {
            return Err(ToolError::InvalidInput {
                name: "progress_tracker".to_string(),
                reason: "empty progress report".to_string(),
            });
        }

        let mut record = ProgressRecord::new();
        record.insert("report".to_string(), input.trim().to_string());
        record.insert("recorded_at".to_string(), Utc::now().to_rfc3339());
        record.insert(
            "entry".to_string(),
            (ctx.progress_logs.len() + 1).to_string(),
        );
        if let Some(goal) = &ctx.goal {
            record.insert("goal".to_string(), goal.to_string());
        }
        tracing::info!(entry = ctx.progress_logs.len() + 1, "Progress recorded");
        Ok(record)
    }
}
