//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Configuration for the LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key for the provider.
    pub api_key: SecretString,
    /// Model identifier.
    pub model: String,
    /// Base URL of an OpenAI-compatible chat completions API.
    pub api_base: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl LlmConfig {
    /// Build from environment variables.
    ///
    /// `WELLNESS_API_KEY` is required; `WELLNESS_MODEL` and
    /// `WELLNESS_API_BASE` fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("WELLNESS_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("WELLNESS_API_KEY".to_string()))?;

        let model =
            std::env::var("WELLNESS_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let api_base = std::env::var("WELLNESS_API_BASE")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        Ok(Self {
            api_key: SecretString::from(api_key),
            model,
            api_base,
            request_timeout: Duration::from_secs(60),
        })
    }
}

/// Workflow-level configuration.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Name used in log output and prompts.
    pub agent_name: String,
    /// Number of upcoming check-ins the scheduler reports.
    pub checkin_count: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            agent_name: "wellness-assist".to_string(),
            checkin_count: 4,
        }
    }
}
