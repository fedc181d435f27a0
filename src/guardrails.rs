//! Input guardrails — field-level validation for goal and diet input.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Metrics accepted for a quantified goal.
pub const VALID_METRICS: &[&str] = &["kg", "lbs", "cm", "inches"];

/// Validated goal input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalInput {
    pub quantity: f64,
    /// e.g. "kg", "lbs", "cm"
    pub metric: String,
    /// e.g. "2 months"
    pub duration: String,
    /// e.g. "lose", "gain", "maintain"
    pub goal_type: String,
}

impl GoalInput {
    /// Check field constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !VALID_METRICS.contains(&self.metric.as_str()) {
            return Err(ValidationError::InvalidMetric {
                metric: self.metric.clone(),
                allowed: VALID_METRICS,
            });
        }
        if self.goal_type.trim().is_empty() {
            return Err(ValidationError::EmptyField("goal_type"));
        }
        Ok(())
    }
}

/// Validated dietary input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietaryInput {
    pub preference: String,
    pub restrictions: Option<Vec<String>>,
    pub allergies: Option<Vec<String>>,
}

impl DietaryInput {
    /// Check field constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.preference.trim().is_empty() {
            return Err(ValidationError::EmptyField("preference"));
        }
        Ok(())
    }
}

/// Normalize a unit word from free text to a canonical metric, if recognized.
pub fn canonical_metric(word: &str) -> Option<&'static str> {
    match word.to_lowercase().as_str() {
        "kg" | "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" => Some("kg"),
        "lb" | "lbs" | "pound" | "pounds" => Some("lbs"),
        "cm" | "centimeter" | "centimeters" => Some("cm"),
        "inch" | "inches" => Some("inches"),
        _ => None,
    }
}
