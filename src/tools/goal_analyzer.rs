//! Regex-based goal analysis.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use crate::context::{Goal, SessionContext};
use crate::error::ToolError;
use crate::guardrails::{GoalInput, canonical_metric};
use crate::tools::{GoalAnalysis, GoalAnalyzer};

fn quantity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(kg|kgs|kilograms?|kilos?|lbs?|pounds?|cm|centimeters?|inch|inches)\b")
            .expect("quantity regex is valid")
    })
}

fn duration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+)\s*(day|week|month|year)s?\b").expect("duration regex is valid")
    })
}

/// Classify the kind of goal stated in the input, if any.
fn detect_goal_type(lowered: &str) -> Option<&'static str> {
    let mentions_weight = lowered.contains("weight") || lowered.contains("fat");
    let mentions_muscle = lowered.contains("muscle") || lowered.contains("strength");

    if lowered.contains("lose") || lowered.contains("slim") || lowered.contains("shed") {
        return Some("weight loss");
    }
    if lowered.contains("gain") || lowered.contains("build") || lowered.contains("bulk") {
        if mentions_muscle {
            return Some("muscle gain");
        }
        if mentions_weight {
            return Some("weight gain");
        }
        return Some("muscle gain");
    }
    if lowered.contains("maintain") {
        return Some("maintenance");
    }
    if lowered.contains("endurance") || lowered.contains("stamina") || lowered.contains("marathon")
    {
        return Some("endurance");
    }
    None
}

/// Goal analyzer that extracts goal type, quantity, and duration with
/// pattern matching. No LLM round-trip; analysis is deterministic.
pub struct RegexGoalAnalyzer;

impl RegexGoalAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RegexGoalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GoalAnalyzer for RegexGoalAnalyzer {
    async fn analyze(
        &self,
        input: &str,
        _ctx: &SessionContext,
    ) -> Result<GoalAnalysis, ToolError> {
        let lowered = input.to_lowercase();

        let Some(goal_type) = detect_goal_type(&lowered) else {
            return Ok(GoalAnalysis::Unrecognized(serde_json::json!({
                "input": input,
                "reason": "no goal keyword found",
            })));
        };

        let mut quantity = None;
        let mut metric = "weight".to_string();
        if let Some(caps) = quantity_re().captures(input) {
            let value: f64 = caps[1].parse().map_err(|e| ToolError::InvalidInput {
                name: "goal_analyzer".to_string(),
                reason: format!("unparseable quantity {}: {e}", &caps[1]),
            })?;
            if let Some(unit) = canonical_metric(&caps[2]) {
                let candidate = GoalInput {
                    quantity: value,
                    metric: unit.to_string(),
                    duration: String::new(),
                    goal_type: goal_type.to_string(),
                };
                // Drop the quantity rather than fail the stage on a bad unit.
                if candidate.validate().is_ok() {
                    quantity = Some(value);
                    metric = unit.to_string();
                }
            }
        }

        let duration = duration_re()
            .captures(&lowered)
            .map(|caps| format!("{} {}s", &caps[1], &caps[2]));

        tracing::debug!(goal_type, ?quantity, ?duration, "Goal analysis");
        Ok(GoalAnalysis::Goal(Goal {
            quantity,
            metric,
            duration,
            goal_type: goal_type.to_string(),
        }))
    }
}
