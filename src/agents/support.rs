//! Rule-based specialized support agents.

use async_trait::async_trait;

use crate::agents::{SupportAgent, SupportAgentKind};
use crate::context::SessionContext;
use crate::error::AgentError;

/// Injury and recovery guidance.
pub struct InjurySupportAgent;

impl InjurySupportAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InjurySupportAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SupportAgent for InjurySupportAgent {
    fn kind(&self) -> SupportAgentKind {
        SupportAgentKind::InjurySupport
    }

    async fn run(&self, _input: &str, ctx: &SessionContext) -> Result<String, AgentError> {
        let mut reply = String::from(
            "I'm sorry to hear you're in pain. Stop any exercise that aggravates it, \
apply the RICE protocol (rest, ice, compression, elevation) for the first 48 hours, \
and see a physician if the pain is sharp, persistent, or getting worse.",
        );
        if ctx.workout_plan.is_some() {
            reply.push_str(
                " I'll keep your workout plan on file; we can swap in low-impact \
sessions once you're cleared to train again.",
            );
        }
        if let Some(notes) = &ctx.injury_notes {
            tracing::debug!(notes = %notes, "Injury notes on file");
        }
        Ok(reply)
    }
}

/// Nutrition and diet guidance.
pub struct NutritionExpertAgent;

impl NutritionExpertAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NutritionExpertAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SupportAgent for NutritionExpertAgent {
    fn kind(&self) -> SupportAgentKind {
        SupportAgentKind::NutritionExpert
    }

    async fn run(&self, _input: &str, ctx: &SessionContext) -> Result<String, AgentError> {
        let mut reply = String::from(
            "Good nutrition question. Build each meal around a lean protein, \
vegetables, and a whole-grain carbohydrate, and keep portions consistent \
day to day.",
        );
        if let Some(diet) = &ctx.diet_preferences {
            reply.push_str(&format!(
                " I've taken your preferences into account: {diet}."
            ));
        }
        if ctx.meal_plan.is_some() {
            reply.push_str(" Your current meal plan already follows these rules; ask me if you want any day adjusted.");
        }
        Ok(reply)
    }
}

/// Fallback for requests no expert covers.
pub struct EscalationAgent;

impl EscalationAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EscalationAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SupportAgent for EscalationAgent {
    fn kind(&self) -> SupportAgentKind {
        SupportAgentKind::Escalation
    }

    async fn run(&self, input: &str, _ctx: &SessionContext) -> Result<String, AgentError> {
        tracing::info!("Escalating request to a human coach");
        Ok(format!(
            "This needs more than I can safely advise on, so I'm escalating it to a \
human coach who will follow up with you. Your message has been passed along: \"{input}\""
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn injury_agent_mentions_plan_when_present() {
        let agent = InjurySupportAgent::new();
        let mut ctx = SessionContext::default();
        let reply = agent.run("my knee hurts", &ctx).await.unwrap();
        assert!(reply.contains("RICE"));
        assert!(!reply.contains("workout plan on file"));

        ctx.workout_plan = Some(vec!["Day 1: squats".to_string()]);
        let reply = agent.run("my knee hurts", &ctx).await.unwrap();
        assert!(reply.contains("workout plan on file"));
    }

    #[tokio::test]
    async fn nutrition_agent_reflects_preferences() {
        let agent = NutritionExpertAgent::new();
        let mut ctx = SessionContext::default();
        ctx.diet_preferences = Some("vegetarian".to_string());
        let reply = agent.run("what should I eat", &ctx).await.unwrap();
        assert!(reply.contains("vegetarian"));
    }

    #[tokio::test]
    async fn escalation_echoes_request() {
        let agent = EscalationAgent::new();
        let ctx = SessionContext::default();
        let reply = agent.run("something unusual", &ctx).await.unwrap();
        assert!(reply.contains("something unusual"));
        assert!(reply.contains("human coach"));
    }
}
