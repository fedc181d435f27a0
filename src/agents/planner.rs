//! LLM-backed conversational planner agent.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::agents::{AgentReply, PlannerAgent};
use crate::context::{Goal, SessionContext};
use crate::error::AgentError;
use crate::llm::LlmProvider;

const SYSTEM_PROMPT: &str = "You are a supportive health and wellness coach. \
Answer the user's message conversationally. If the message states a concrete \
health goal (losing or gaining weight, building muscle, improving endurance), \
extract it. Reply with a single JSON object of the form \
{\"response\": \"<your reply>\", \"goal\": {\"quantity\": <number or null>, \
\"metric\": \"<unit>\", \"duration\": <string or null>, \
\"goal_type\": \"<kind of goal>\"} or null}.";

/// Wire shape the model is asked to produce.
#[derive(Debug, Deserialize)]
struct PlannerWireReply {
    response: String,
    #[serde(default)]
    goal: Option<Goal>,
}

/// Conversational agent backed by an `LlmProvider`.
pub struct LlmPlanner {
    llm: Arc<dyn LlmProvider>,
}

impl LlmPlanner {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    fn build_prompt(&self, input: &str, ctx: &SessionContext) -> String {
        let mut prompt = String::from(SYSTEM_PROMPT);
        prompt.push_str("\n\nSession so far:");
        match &ctx.goal {
            Some(goal) => prompt.push_str(&format!("\n- goal: {goal}")),
            None => prompt.push_str("\n- goal: not set yet"),
        }
        if let Some(profile) = &ctx.user_profile {
            prompt.push_str(&format!("\n- profile: {profile}"));
        }
        if let Some(diet) = &ctx.diet_preferences {
            prompt.push_str(&format!("\n- diet preferences: {diet}"));
        }
        prompt.push_str(&format!("\n\nUser: {input}"));
        prompt
    }

    /// Parse the model output into a reply.
    ///
    /// Models wrap JSON in code fences or prose often enough that this cannot
    /// be strict: if no JSON object parses, the raw text becomes the reply and
    /// no goal is extracted.
    fn parse_reply(raw: &str) -> AgentReply {
        let candidate = extract_json_object(raw).unwrap_or(raw);
        match serde_json::from_str::<PlannerWireReply>(candidate) {
            Ok(wire) => AgentReply {
                text: wire.response,
                extracted_goal: wire.goal,
            },
            Err(_) => AgentReply::text_only(raw.trim()),
        }
    }
}

/// Find the outermost `{...}` span in a string, if any.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

#[async_trait]
impl PlannerAgent for LlmPlanner {
    async fn run(&self, input: &str, ctx: &SessionContext) -> Result<AgentReply, AgentError> {
        let prompt = self.build_prompt(input, ctx);
        tracing::debug!(model = self.llm.model_name(), "Planner agent call");
        let raw = self.llm.complete(&prompt).await?;
        Ok(Self::parse_reply(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;

    struct CannedLlm(String);

    #[async_trait]
    impl LlmProvider for CannedLlm {
        fn model_name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn parse_reply_with_goal() {
        let raw = r#"{"response": "Got it, let's lose 5 kg.", "goal": {"quantity": 5, "metric": "kg", "duration": "2 months", "goal_type": "weight loss"}}"#;
        let reply = LlmPlanner::parse_reply(raw);
        assert_eq!(reply.text, "Got it, let's lose 5 kg.");
        let goal = reply.extracted_goal.unwrap();
        assert_eq!(goal.quantity, Some(5.0));
        assert_eq!(goal.metric, "kg");
    }

    #[test]
    fn parse_reply_null_goal() {
        let raw = r#"{"response": "Tell me more.", "goal": null}"#;
        let reply = LlmPlanner::parse_reply(raw);
        assert_eq!(reply.text, "Tell me more.");
        assert!(reply.extracted_goal.is_none());
    }

    #[test]
    fn parse_reply_code_fenced() {
        let raw = "```json\n{\"response\": \"Sure.\", \"goal\": null}\n```";
        let reply = LlmPlanner::parse_reply(raw);
        assert_eq!(reply.text, "Sure.");
    }

    #[test]
    fn parse_reply_degrades_to_plain_text() {
        let reply = LlmPlanner::parse_reply("I can help with that!");
        assert_eq!(reply.text, "I can help with that!");
        assert!(reply.extracted_goal.is_none());
    }

    #[tokio::test]
    async fn prompt_includes_session_state() {
        let mut ctx = SessionContext::default();
        ctx.user_profile = Some("beginner".to_string());
        let planner = LlmPlanner::new(Arc::new(CannedLlm(
            r#"{"response": "ok", "goal": null}"#.to_string(),
        )));
        let prompt = planner.build_prompt("hello", &ctx);
        assert!(prompt.contains("profile: beginner"));
        assert!(prompt.contains("goal: not set yet"));
        assert!(prompt.contains("User: hello"));

        let reply = planner.run("hello", &ctx).await.unwrap();
        assert_eq!(reply.text, "ok");
    }
}
