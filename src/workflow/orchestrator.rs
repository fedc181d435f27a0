//! Workflow orchestrator — the stage state machine.
//!
//! One orchestrator instance owns one session: the context, the current
//! stage, and the collaborator handles. Callers serialize `process_input`
//! per session; there is no internal locking.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::agents::{PlannerAgent, SupportAgentKind, SupportRegistry};
use crate::context::SessionContext;
use crate::error::{WorkflowError, WorkflowErrorKind};
use crate::tools::{
    CheckinScheduler, CronCheckinScheduler, GoalAnalyzer, PlanTool, ProgressLog, ProgressTracker,
    RegexGoalAnalyzer, TemplateMealPlanner, TemplateWorkoutRecommender,
};
use crate::workflow::stage::WorkflowStage;

const INJURY_KEYWORDS: &[&str] = &["injury", "pain", "hurt"];
const NUTRITION_KEYWORDS: &[&str] = &["nutrition", "diet", "meal", "food"];
const DIET_PROFILE_KEYWORDS: &[&str] = &[
    "vegetarian",
    "vegan",
    "halal",
    "kosher",
    "gluten",
    "dairy",
    "allerg",
    "dietary",
];

/// A recorded stage transition.
#[derive(Debug, Clone, Serialize)]
pub struct StageTransition {
    pub from: WorkflowStage,
    pub to: WorkflowStage,
    pub timestamp: DateTime<Utc>,
    pub reason: String,
}

/// Orchestrator-owned workflow state.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowState {
    /// Stage the next input will be dispatched to.
    pub current_stage: WorkflowStage,
    /// Present for drivers; never enforced as terminal.
    pub workflow_complete: bool,
    /// Transition history, oldest first.
    pub transitions: Vec<StageTransition>,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self {
            current_stage: WorkflowStage::UserStartsChat,
            workflow_complete: false,
            transitions: Vec::new(),
        }
    }

    /// Move to a new stage, recording the transition.
    pub fn transition_to(&mut self, to: WorkflowStage, reason: impl Into<String>) {
        let transition = StageTransition {
            from: self.current_stage,
            to,
            timestamp: Utc::now(),
            reason: reason.into(),
        };
        tracing::debug!(
            from = %transition.from,
            to = %transition.to,
            reason = %transition.reason,
            "Stage transition"
        );
        self.transitions.push(transition);

        // Cap history so steady-state loops can't grow it unboundedly
        const MAX_TRANSITIONS: usize = 200;
        if self.transitions.len() > MAX_TRANSITIONS {
            let drain = self.transitions.len() - MAX_TRANSITIONS;
            self.transitions.drain(..drain);
        }

        self.current_stage = to;
    }
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new()
    }
}

/// Response payload: conversational text or a structured tool result.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Text(String),
    Structured(serde_json::Value),
}

impl ResponseBody {
    /// Text form for plain rendering.
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Structured(value) => value.to_string(),
        }
    }
}

/// Failure description carried in the envelope instead of being raised.
#[derive(Debug, Clone, Serialize)]
pub struct EnvelopeError {
    pub kind: WorkflowErrorKind,
    pub message: String,
}

/// Uniform per-turn response.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    /// Stage after the turn was handled.
    pub stage: WorkflowStage,
    pub response: ResponseBody,
    /// Snapshot of the session context after the turn.
    pub context: SessionContext,
    pub next_actions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<EnvelopeError>,
}

/// The agents and tools a workflow delegates content generation to.
pub struct Collaborators {
    pub planner: Arc<dyn PlannerAgent>,
    pub goal_analyzer: Arc<dyn GoalAnalyzer>,
    pub meal_planner: Arc<dyn PlanTool>,
    pub workout_recommender: Arc<dyn PlanTool>,
    pub progress_tracker: Arc<dyn ProgressTracker>,
    pub checkin_scheduler: Arc<dyn CheckinScheduler>,
    pub support: SupportRegistry,
}

impl Collaborators {
    /// Wire the built-in tools and support agents around a planner agent.
    pub fn with_defaults(planner: Arc<dyn PlannerAgent>) -> Self {
        Self {
            planner,
            goal_analyzer: Arc::new(RegexGoalAnalyzer::new()),
            meal_planner: Arc::new(TemplateMealPlanner::new()),
            workout_recommender: Arc::new(TemplateWorkoutRecommender::new()),
            progress_tracker: Arc::new(ProgressLog::new()),
            checkin_scheduler: Arc::new(CronCheckinScheduler::default()),
            support: SupportRegistry::with_defaults(),
        }
    }
}

type StageResult = Result<ResponseBody, WorkflowError>;

/// The stage state machine. Owns one session's context and state.
pub struct WorkflowOrchestrator {
    context: SessionContext,
    state: WorkflowState,
    collab: Collaborators,
}

impl WorkflowOrchestrator {
    pub fn new(collab: Collaborators) -> Self {
        Self {
            context: SessionContext::default(),
            state: WorkflowState::new(),
            collab,
        }
    }

    /// Stage the next input will be dispatched to.
    pub fn current_stage(&self) -> WorkflowStage {
        self.state.current_stage
    }

    /// The accumulated session context.
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Recorded stage transitions, oldest first.
    pub fn transitions(&self) -> &[StageTransition] {
        &self.state.transitions
    }

    /// Replace context and state with fresh defaults. No partial reset.
    pub fn reset(&mut self) {
        tracing::info!("Resetting workflow session");
        self.context = SessionContext::default();
        self.state = WorkflowState::new();
    }

    /// Driver-side redirection into a steady-state sub-loop (e.g. progress
    /// tracking). The sub-loops have no inbound transitions of their own.
    pub fn redirect_to(&mut self, stage: WorkflowStage) {
        self.state.transition_to(stage, "external redirect");
    }

    /// Handle one turn. Never fails: collaborator errors are folded into the
    /// envelope, so a single bad turn cannot crash the driver loop.
    pub async fn process_input(&mut self, input: &str) -> ResponseEnvelope {
        tracing::info!(stage = %self.state.current_stage, "Processing input");
        let result = match self.state.current_stage {
            WorkflowStage::UserStartsChat => self.handle_user_starts_chat(input).await,
            WorkflowStage::GoalCollection => self.handle_goal_collection(input).await,
            WorkflowStage::ProfileSetup => self.handle_profile_setup(input).await,
            WorkflowStage::PlanGeneration => self.handle_plan_generation().await,
            WorkflowStage::RealTimeDelivery => self.handle_real_time_delivery(input).await,
            WorkflowStage::ProgressTracking => self.handle_progress_tracking(input).await,
            WorkflowStage::SpecializedHelp => {
                self.handle_specialized_help(input, SupportAgentKind::Escalation)
                    .await
            }
            WorkflowStage::OngoingSupport => self.handle_ongoing_support(input).await,
        };

        match result {
            Ok(body) => self.envelope(body, None),
            Err(err) => {
                tracing::warn!(
                    stage = %self.state.current_stage,
                    error = %err,
                    "Collaborator failure"
                );
                let message = err.to_string();
                self.envelope(
                    ResponseBody::Text(message.clone()),
                    Some(EnvelopeError {
                        kind: err.kind(),
                        message,
                    }),
                )
            }
        }
    }

    /// Stage 1: capture the profile, let the planner read intent, and branch
    /// on whether it extracted a goal.
    async fn handle_user_starts_chat(&mut self, input: &str) -> StageResult {
        self.context.user_profile = Some(input.to_string());

        let reply = self.collab.planner.run(input, &self.context).await?;

        if let Some(goal) = reply.extracted_goal {
            tracing::info!(%goal, "Goal detected in initial input");
            self.context.goal = Some(goal);
            self.state
                .transition_to(WorkflowStage::ProfileSetup, "goal detected in initial input");
            Ok(ResponseBody::Text(format!(
                "{}\n\nNow let's set up your profile. Could you share your current fitness \
level, dietary preferences, and any health considerations?",
                reply.text
            )))
        } else {
            self.state
                .transition_to(WorkflowStage::GoalCollection, "no goal detected");
            Ok(ResponseBody::Text(format!(
                "{}\n\nLet's start by understanding your health and wellness goals. \
What would you like to achieve?",
                reply.text
            )))
        }
    }

    /// Stage 2: analyze the goal statement; unrecognized shapes fall back to
    /// the default record. Always advances to profile setup.
    async fn handle_goal_collection(&mut self, input: &str) -> StageResult {
        let analysis = self.collab.goal_analyzer.analyze(input, &self.context).await?;
        let goal = analysis.into_goal();
        tracing::info!(%goal, "Goal recorded");
        self.context.goal = Some(goal.clone());

        self.state
            .transition_to(WorkflowStage::ProfileSetup, "goal analyzed");
        Ok(ResponseBody::Text(format!(
            "Great, I've got your goal down: {goal}.\n\nNow let's set up your profile. \
Could you share your current fitness level, dietary preferences, and any health \
considerations?"
        )))
    }

    /// Stage 3: record the profile, then let the planner acknowledge it.
    /// Profile capture happens before the agent call and survives its failure.
    async fn handle_profile_setup(&mut self, input: &str) -> StageResult {
        self.context.user_profile = Some(input.to_string());

        let lowered = input.to_lowercase();
        if DIET_PROFILE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            self.context.diet_preferences = Some(input.to_string());
        }

        let reply = self
            .collab
            .planner
            .run(&format!("Profile setup: {input}"), &self.context)
            .await?;

        self.state
            .transition_to(WorkflowStage::PlanGeneration, "profile captured");
        Ok(ResponseBody::Text(format!(
            "Profile updated! {}\n\nNext I'll generate personalized plans for you.",
            reply.text
        )))
    }

    /// Stage 4: generate meal and workout plans. The two calls are sequential
    /// and not atomic: if the workout tool fails after the meal tool
    /// succeeded, the meal plan stays in context and the stage does not
    /// advance.
    async fn handle_plan_generation(&mut self) -> StageResult {
        let goal_text = self
            .context
            .goal
            .as_ref()
            .map(|g| g.to_string())
            .unwrap_or_else(|| "none".to_string());

        let meal_plan = self
            .collab
            .meal_planner
            .plan(&format!("Create meal plan for goals: {goal_text}"), &self.context)
            .await?;
        self.context.meal_plan = Some(meal_plan.clone());

        let workout_plan = self
            .collab
            .workout_recommender
            .plan(
                &format!("Create workout plan for goals: {goal_text}"),
                &self.context,
            )
            .await?;
        self.context.workout_plan = Some(workout_plan.clone());

        self.state
            .transition_to(WorkflowStage::RealTimeDelivery, "plans generated");
        Ok(ResponseBody::Text(format!(
            "Meal plan:\n{}\n\nWorkout plan:\n{}\n\nYour personalized plans are ready. \
Let's get started!",
            meal_plan.join("\n"),
            workout_plan.join("\n")
        )))
    }

    /// Stage 5: route to a specialist on keyword match (injury terms checked
    /// before nutrition terms), otherwise answer with the planner and stay.
    async fn handle_real_time_delivery(&mut self, input: &str) -> StageResult {
        let lowered = input.to_lowercase();

        if INJURY_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            self.context.injury_notes = Some(input.to_string());
            self.state
                .transition_to(WorkflowStage::SpecializedHelp, "injury keywords");
            return self
                .handle_specialized_help(input, SupportAgentKind::InjurySupport)
                .await;
        }

        if NUTRITION_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            self.state
                .transition_to(WorkflowStage::SpecializedHelp, "nutrition keywords");
            return self
                .handle_specialized_help(input, SupportAgentKind::NutritionExpert)
                .await;
        }

        let reply = self.collab.planner.run(input, &self.context).await?;
        Ok(ResponseBody::Text(reply.text))
    }

    /// Stage 6: log progress. Stays in this stage.
    async fn handle_progress_tracking(&mut self, input: &str) -> StageResult {
        let record = self
            .collab
            .progress_tracker
            .track(input, &self.context)
            .await?;
        self.context.progress_logs.push(record.clone());

        Ok(ResponseBody::Structured(serde_json::json!({
            "progress": record,
            "message": "Progress updated. Keep it up — consistency is what gets you there.",
        })))
    }

    /// Stage 7: dispatch to the specialist for `kind` (escalation when the
    /// kind has no registered agent). Stays in this stage.
    async fn handle_specialized_help(
        &mut self,
        input: &str,
        kind: SupportAgentKind,
    ) -> StageResult {
        let agent = self.collab.support.get(kind);
        self.context
            .handoff_logs
            .push(format!("handoff -> {}", agent.kind()));
        tracing::info!(agent = %agent.kind(), "Specialized help");

        let text = agent.run(input, &self.context).await?;
        Ok(ResponseBody::Text(text))
    }

    /// Stage 8: schedule check-ins on request, otherwise keep the
    /// conversation going. Stays in this stage.
    async fn handle_ongoing_support(&mut self, input: &str) -> StageResult {
        let lowered = input.to_lowercase();
        if lowered.contains("schedule") || lowered.contains("checkin") {
            let schedule = self
                .collab
                .checkin_scheduler
                .schedule(input, &self.context)
                .await?;
            return Ok(ResponseBody::Text(format!("Check-in scheduled: {schedule}")));
        }

        let reply = self.collab.planner.run(input, &self.context).await?;
        Ok(ResponseBody::Text(reply.text))
    }

    fn envelope(&self, response: ResponseBody, error: Option<EnvelopeError>) -> ResponseEnvelope {
        let stage = self.state.current_stage;
        ResponseEnvelope {
            stage,
            response,
            context: self.context.clone(),
            next_actions: stage
                .next_actions()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            error,
        }
    }
}
