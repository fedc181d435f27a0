//! Workflow stages.

use serde::{Deserialize, Serialize};

/// A named state of the workflow state machine.
///
/// The linear run is `UserStartsChat → (GoalCollection |) ProfileSetup →
/// PlanGeneration → RealTimeDelivery`; the last three stages are steady-state
/// sub-loops that do not auto-advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    /// Initial contact; captures the profile and branches on goal detection.
    UserStartsChat,
    /// Explicit goal analysis.
    GoalCollection,
    /// Profile and preference capture.
    ProfileSetup,
    /// Meal and workout plan generation.
    PlanGeneration,
    /// Steady-state support loop with specialist routing.
    RealTimeDelivery,
    /// Progress logging sub-loop.
    ProgressTracking,
    /// Specialist agent sub-loop.
    SpecializedHelp,
    /// Check-in scheduling sub-loop.
    OngoingSupport,
}

impl WorkflowStage {
    /// Suggested next actions for a stage. Static table, rendered by drivers.
    pub fn next_actions(self) -> &'static [&'static str] {
        match self {
            Self::UserStartsChat => &["Collect goals", "Ask about preferences"],
            Self::GoalCollection => &["Set up profile", "Gather health info"],
            Self::ProfileSetup => &["Generate plans", "Create meal plan", "Create workout plan"],
            Self::PlanGeneration => &["Start real-time delivery", "Begin guided support"],
            Self::RealTimeDelivery => &[
                "Track progress",
                "Get specialized help",
                "Schedule check-ins",
            ],
            Self::ProgressTracking => &["Continue real-time delivery", "Update plans"],
            Self::SpecializedHelp => &[
                "Return to real-time delivery",
                "Get more specialized help",
            ],
            Self::OngoingSupport => &[
                "Schedule next check-in",
                "Update goals",
                "Continue support",
            ],
        }
    }

    /// Whether this stage is a steady-state sub-loop (never auto-advances).
    pub fn is_steady_state(self) -> bool {
        matches!(
            self,
            Self::RealTimeDelivery
                | Self::ProgressTracking
                | Self::SpecializedHelp
                | Self::OngoingSupport
        )
    }
}

impl std::fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::UserStartsChat => "user_starts_chat",
            Self::GoalCollection => "goal_collection",
            Self::ProfileSetup => "profile_setup",
            Self::PlanGeneration => "plan_generation",
            Self::RealTimeDelivery => "real_time_delivery",
            Self::ProgressTracking => "progress_tracking",
            Self::SpecializedHelp => "specialized_help",
            Self::OngoingSupport => "ongoing_support",
        };
        write!(f, "{s}")
    }
}

/// Error for parsing a stage label.
#[derive(Debug, thiserror::Error)]
#[error("Unknown workflow stage: {0}")]
pub struct UnknownStage(pub String);

impl std::str::FromStr for WorkflowStage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user_starts_chat" => Ok(Self::UserStartsChat),
            "goal_collection" => Ok(Self::GoalCollection),
            "profile_setup" => Ok(Self::ProfileSetup),
            "plan_generation" => Ok(Self::PlanGeneration),
            "real_time_delivery" => Ok(Self::RealTimeDelivery),
            "progress_tracking" => Ok(Self::ProgressTracking),
            "specialized_help" => Ok(Self::SpecializedHelp),
            "ongoing_support" => Ok(Self::OngoingSupport),
            other => Err(UnknownStage(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[WorkflowStage] = &[
        WorkflowStage::UserStartsChat,
        WorkflowStage::GoalCollection,
        WorkflowStage::ProfileSetup,
        WorkflowStage::PlanGeneration,
        WorkflowStage::RealTimeDelivery,
        WorkflowStage::ProgressTracking,
        WorkflowStage::SpecializedHelp,
        WorkflowStage::OngoingSupport,
    ];

    #[test]
    fn next_actions_table() {
        assert_eq!(
            WorkflowStage::UserStartsChat.next_actions(),
            ["Collect goals", "Ask about preferences"]
        );
        assert_eq!(
            WorkflowStage::GoalCollection.next_actions(),
            ["Set up profile", "Gather health info"]
        );
        assert_eq!(
            WorkflowStage::ProfileSetup.next_actions(),
            ["Generate plans", "Create meal plan", "Create workout plan"]
        );
        assert_eq!(
            WorkflowStage::PlanGeneration.next_actions(),
            ["Start real-time delivery", "Begin guided support"]
        );
        assert_eq!(
            WorkflowStage::RealTimeDelivery.next_actions(),
            ["Track progress", "Get specialized help", "Schedule check-ins"]
        );
        assert_eq!(
            WorkflowStage::ProgressTracking.next_actions(),
            ["Continue real-time delivery", "Update plans"]
        );
        assert_eq!(
            WorkflowStage::SpecializedHelp.next_actions(),
            ["Return to real-time delivery", "Get more specialized help"]
        );
        assert_eq!(
            WorkflowStage::OngoingSupport.next_actions(),
            ["Schedule next check-in", "Update goals", "Continue support"]
        );
    }

    #[test]
    fn display_and_parse_roundtrip() {
        for stage in ALL {
            let label = stage.to_string();
            let parsed: WorkflowStage = label.parse().unwrap();
            assert_eq!(parsed, *stage);
        }
        assert!("no_such_stage".parse::<WorkflowStage>().is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&WorkflowStage::RealTimeDelivery).unwrap();
        assert_eq!(json, "\"real_time_delivery\"");
    }

    #[test]
    fn steady_state_stages() {
        assert!(!WorkflowStage::UserStartsChat.is_steady_state());
        assert!(!WorkflowStage::PlanGeneration.is_steady_state());
        assert!(WorkflowStage::RealTimeDelivery.is_steady_state());
        assert!(WorkflowStage::ProgressTracking.is_steady_state());
        assert!(WorkflowStage::SpecializedHelp.is_steady_state());
        assert!(WorkflowStage::OngoingSupport.is_steady_state());
    }
}
