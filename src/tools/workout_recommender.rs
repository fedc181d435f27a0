//! Template-based 7-day workout recommendation.

use async_trait::async_trait;

use crate::context::SessionContext;
use crate::error::ToolError;
use crate::tools::PlanTool;

/// Experience level inferred from the profile text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

fn detect_level(ctx: &SessionContext) -> Level {
    let profile = ctx
        .user_profile
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    if profile.contains("advanced") || profile.contains("athlete") {
        Level::Advanced
    } else if profile.contains("intermediate") {
        Level::Intermediate
    } else {
        Level::Beginner
    }
}

fn sets_for(level: Level) -> &'static str {
    match level {
        Level::Beginner => "2 sets of 10-12 reps",
        Level::Intermediate => "3 sets of 10-12 reps",
        Level::Advanced => "4 sets of 8-10 reps",
    }
}

fn cardio_minutes(level: Level) -> u32 {
    match level {
        Level::Beginner => 25,
        Level::Intermediate => 35,
        Level::Advanced => 45,
    }
}

/// Deterministic workout recommender: a weekly split adjusted to the goal
/// type and the experience level named in the profile.
pub struct TemplateWorkoutRecommender;

impl TemplateWorkoutRecommender {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TemplateWorkoutRecommender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlanTool for TemplateWorkoutRecommender {
    fn name(&self) -> &str {
        "workout_recommender"
    }

    async fn plan(&self, request: &str, ctx: &SessionContext) -> Result<Vec<String>, ToolError> {
        let level = detect_level(ctx);
        let sets = sets_for(level);
        let cardio = cardio_minutes(level);
        let goal_type = ctx
            .goal
            .as_ref()
            .map(|g| g.goal_type.clone())
            .unwrap_or_else(|| "general fitness".to_string());

        // Endurance goals swap the strength emphasis for extra cardio volume.
        let endurance = goal_type == "endurance";

        tracing::debug!(request, ?level, %goal_type, "Generating workout plan");
        let plan = vec![
            format!(
                "Monday: Full body circuit — squats {sets}, push-ups {sets}, rows {sets}, plank 3x45s"
            ),
            format!("Tuesday: {cardio} min moderate cardio (brisk walk, cycle, or swim)"),
            if endurance {
                format!("Wednesday: {} min tempo run with 5 min warm-up and cool-down", cardio + 10)
            } else {
                format!("Wednesday: Upper body — bench press {sets}, overhead press {sets}, curls {sets}")
            },
            format!("Thursday: {cardio} min cardio, different activity than Tuesday"),
            if endurance {
                "Friday: Interval session — 8x400m at hard effort with equal rest".to_string()
            } else {
                format!("Friday: Lower body — squats {sets}, deadlifts {sets}, calf raises {sets}")
            },
            "Saturday: Active rest — 30-60 min light yoga or a leisurely walk".to_string(),
            "Sunday: Rest".to_string(),
        ];
        Ok(plan)
    }
}
