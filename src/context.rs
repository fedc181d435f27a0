//! Session context — the mutable record accumulated across workflow stages.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single progress-tracking entry, key/value pairs in insertion-stable order.
pub type ProgressRecord = BTreeMap<String, String>;

/// A structured wellness goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Target amount, if the user named one (e.g. 5.0 for "lose 5 kg").
    pub quantity: Option<f64>,
    /// What is being measured (e.g. "kg", "weight").
    pub metric: String,
    /// Time frame, if the user named one (e.g. "2 months").
    pub duration: Option<String>,
    /// Kind of goal (e.g. "weight loss", "muscle gain").
    pub goal_type: String,
}

impl Goal {
    /// Default record used when goal analysis cannot recognize the input.
    pub fn fallback() -> Self {
        Self {
            quantity: None,
            metric: "weight".to_string(),
            duration: None,
            goal_type: "weight loss".to_string(),
        }
    }
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.goal_type)?;
        if let Some(q) = self.quantity {
            write!(f, ", {} {}", q, self.metric)?;
        }
        if let Some(d) = &self.duration {
            write!(f, " over {}", d)?;
        }
        Ok(())
    }
}

/// Per-session record of user data, owned exclusively by one orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// Unique session ID.
    pub session_id: Uuid,
    /// Display name of the user.
    pub display_name: String,
    /// Numeric user identifier.
    pub user_id: i64,
    /// Structured goal, set once goal analysis (or the planner agent) derives one.
    pub goal: Option<Goal>,
    /// Free-text profile; both the initial-chat and profile-setup stages write
    /// this, last write wins.
    pub user_profile: Option<String>,
    /// Free-text dietary preferences.
    pub diet_preferences: Option<String>,
    /// Per-day workout entries, set by plan generation.
    pub workout_plan: Option<Vec<String>>,
    /// Per-day meal entries, set by plan generation.
    pub meal_plan: Option<Vec<String>>,
    /// Free-text injury notes.
    pub injury_notes: Option<String>,
    /// Append-only log of handoffs to specialized agents.
    pub handoff_logs: Vec<String>,
    /// Append-only log of progress-tracking events.
    pub progress_logs: Vec<ProgressRecord>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            display_name: "Anonymous".to_string(),
            user_id: 0,
            goal: None,
            user_profile: None,
            diet_preferences: None,
            workout_plan: None,
            meal_plan: None,
            injury_notes: None,
            handoff_logs: Vec::new(),
            progress_logs: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

impl SessionContext {
    /// Create a fresh context for a named user.
    pub fn for_user(display_name: impl Into<String>, user_id: i64) -> Self {
        Self {
            display_name: display_name.into(),
            user_id,
            ..Default::default()
        }
    }
}
