//! Agent seams — the conversational planner and the specialized support agents.

pub mod planner;
pub mod support;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::{Goal, SessionContext};
use crate::error::AgentError;

pub use planner::LlmPlanner;
pub use support::{EscalationAgent, InjurySupportAgent, NutritionExpertAgent};

/// Reply from the conversational planner agent.
///
/// Goal extraction is part of the reply rather than a hidden context
/// mutation, so the caller can branch on it directly.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    /// Conversational text to show the user.
    pub text: String,
    /// Goal the agent detected in the input, if any.
    pub extracted_goal: Option<Goal>,
}

impl AgentReply {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            extracted_goal: None,
        }
    }
}

/// The main conversational agent.
#[async_trait]
pub trait PlannerAgent: Send + Sync {
    async fn run(&self, input: &str, ctx: &SessionContext) -> Result<AgentReply, AgentError>;
}

/// Which specialized agent a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportAgentKind {
    InjurySupport,
    NutritionExpert,
    Escalation,
}

impl std::fmt::Display for SupportAgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InjurySupport => "injury_support",
            Self::NutritionExpert => "nutrition_expert",
            Self::Escalation => "escalation",
        };
        write!(f, "{s}")
    }
}

/// A specialized expert agent.
#[async_trait]
pub trait SupportAgent: Send + Sync {
    fn kind(&self) -> SupportAgentKind;

    async fn run(&self, input: &str, ctx: &SessionContext) -> Result<String, AgentError>;
}

/// Registry of specialized agents, keyed by kind.
///
/// Lookups for a kind with no registered agent fall back to escalation, so
/// routing never dead-ends.
pub struct SupportRegistry {
    agents: HashMap<SupportAgentKind, Arc<dyn SupportAgent>>,
    escalation: Arc<dyn SupportAgent>,
}

impl SupportRegistry {
    /// Build a registry with the given escalation fallback.
    pub fn new(escalation: Arc<dyn SupportAgent>) -> Self {
        let mut agents: HashMap<SupportAgentKind, Arc<dyn SupportAgent>> = HashMap::new();
        agents.insert(SupportAgentKind::Escalation, Arc::clone(&escalation));
        Self { agents, escalation }
    }

    /// Build a registry with the built-in rule-based experts.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new(Arc::new(EscalationAgent::new()));
        registry.register(Arc::new(InjurySupportAgent::new()));
        registry.register(Arc::new(NutritionExpertAgent::new()));
        registry
    }

    /// Register an agent under its own kind.
    pub fn register(&mut self, agent: Arc<dyn SupportAgent>) {
        tracing::debug!(agent = %agent.kind(), "Registered support agent");
        self.agents.insert(agent.kind(), agent);
    }

    /// Get the agent for a kind, falling back to escalation.
    pub fn get(&self, kind: SupportAgentKind) -> Arc<dyn SupportAgent> {
        self.agents
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.escalation))
    }
}
