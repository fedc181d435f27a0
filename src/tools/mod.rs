//! Tool seams — one typed trait per collaborator.

pub mod goal_analyzer;
pub mod meal_planner;
pub mod scheduler;
pub mod tracker;
pub mod workout_recommender;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::context::{Goal, ProgressRecord, SessionContext};
use crate::error::ToolError;

pub use goal_analyzer::RegexGoalAnalyzer;
pub use meal_planner::TemplateMealPlanner;
pub use scheduler::CronCheckinScheduler;
pub use tracker::ProgressLog;
pub use workout_recommender::TemplateWorkoutRecommender;

/// Result of goal analysis.
///
/// The two recognized shapes mirror the result keys upstream analyzers have
/// used (`goal` vs `goals`); anything else is `Unrecognized` and maps
/// deterministically to the fallback record.
#[derive(Debug, Clone, PartialEq)]
pub enum GoalAnalysis {
    /// Result carried under a `goal` key.
    Goal(Goal),
    /// Result carried under a `goals` key.
    Goals(Goal),
    /// Shape not recognized; the raw value is kept for diagnostics.
    Unrecognized(serde_json::Value),
}

impl GoalAnalysis {
    /// Probe a raw JSON result for the recognized shapes. `goal` wins over
    /// `goals`; anything else is `Unrecognized`.
    pub fn from_value(value: serde_json::Value) -> Self {
        if let Some(inner) = value.get("goal")
            && let Ok(goal) = serde_json::from_value::<Goal>(inner.clone())
        {
            return Self::Goal(goal);
        }
        if let Some(inner) = value.get("goals")
            && let Ok(goal) = serde_json::from_value::<Goal>(inner.clone())
        {
            return Self::Goals(goal);
        }
        Self::Unrecognized(value)
    }

    /// Resolve to a concrete goal, substituting the fallback record for
    /// unrecognized shapes.
    pub fn into_goal(self) -> Goal {
        match self {
            Self::Goal(goal) | Self::Goals(goal) => goal,
            Self::Unrecognized(value) => {
                tracing::warn!(raw = %value, "Unrecognized goal analysis shape, using fallback");
                Goal::fallback()
            }
        }
    }
}

/// Analyzes free-text goal statements into a structured goal.
#[async_trait]
pub trait GoalAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        input: &str,
        ctx: &SessionContext,
    ) -> Result<GoalAnalysis, ToolError>;
}

/// Produces a per-day plan (meal planner, workout recommender).
#[async_trait]
pub trait PlanTool: Send + Sync {
    /// Tool name, for logging and error reporting.
    fn name(&self) -> &str;

    async fn plan(&self, request: &str, ctx: &SessionContext) -> Result<Vec<String>, ToolError>;
}

/// Records a progress report as a structured event.
#[async_trait]
pub trait ProgressTracker: Send + Sync {
    async fn track(
        &self,
        input: &str,
        ctx: &SessionContext,
    ) -> Result<ProgressRecord, ToolError>;
}

/// A scheduled run of future check-ins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckinSchedule {
    /// Human-readable cadence (e.g. "weekly").
    pub cadence: String,
    /// Upcoming check-in times, earliest first.
    pub upcoming: Vec<DateTime<Utc>>,
}

impl std::fmt::Display for CheckinSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} check-ins", self.cadence)?;
        if let Some(first) = self.upcoming.first() {
            write!(f, ", next on {}", first.format("%Y-%m-%d %H:%M UTC"))?;
        }
        Ok(())
    }
}

/// Schedules future check-ins.
#[async_trait]
pub trait CheckinScheduler: Send + Sync {
    async fn schedule(
        &self,
        input: &str,
        ctx: &SessionContext,
    ) -> Result<CheckinSchedule, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_goal_key() {
        let value = json!({"goal": {"quantity": 5.0, "metric": "kg", "duration": null, "goal_type": "weight loss"}});
        let analysis = GoalAnalysis::from_value(value);
        match &analysis {
            GoalAnalysis::Goal(goal) => assert_eq!(goal.metric, "kg"),
            other => panic!("expected Goal variant, got {other:?}"),
        }
    }

    #[test]
    fn from_value_goals_key() {
        let value = json!({"goals": {"quantity": null, "metric": "weight", "duration": null, "goal_type": "weight loss"}});
        assert!(matches!(
            GoalAnalysis::from_value(value),
            GoalAnalysis::Goals(_)
        ));
    }

    #[test]
    fn goal_key_wins_over_goals_key() {
        let value = json!({
            "goal": {"quantity": 1.0, "metric": "kg", "duration": null, "goal_type": "a"},
            "goals": {"quantity": 2.0, "metric": "lbs", "duration": null, "goal_type": "b"},
        });
        match GoalAnalysis::from_value(value) {
            GoalAnalysis::Goal(goal) => assert_eq!(goal.quantity, Some(1.0)),
            other => panic!("expected Goal variant, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_shape_maps_to_fallback() {
        let analysis = GoalAnalysis::from_value(json!({"summary": "lose weight"}));
        assert!(matches!(analysis, GoalAnalysis::Unrecognized(_)));
        assert_eq!(analysis.into_goal(), Goal::fallback());
    }

    #[test]
    fn malformed_goal_value_is_unrecognized() {
        // `goal` key present but not a valid goal record.
        let analysis = GoalAnalysis::from_value(json!({"goal": "lose weight"}));
        assert!(matches!(analysis, GoalAnalysis::Unrecognized(_)));
    }

    #[test]
    fn schedule_display() {
        let schedule = CheckinSchedule {
            cadence: "weekly".to_string(),
            upcoming: vec![],
        };
        assert_eq!(schedule.to_string(), "weekly check-ins");
    }
}
