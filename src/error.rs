//! Error types for Wellness Assist.

use serde::Serialize;

/// Top-level error type for the planner.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Agent invocation errors.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Agent {name} failed: {reason}")]
    Failed { name: String, reason: String },
}

/// Tool execution errors.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool {name} execution failed: {reason}")]
    ExecutionFailed { name: String, reason: String },

    #[error("Invalid input for tool {name}: {reason}")]
    InvalidInput { name: String, reason: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Input validation errors (guardrails).
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Metric must be one of {allowed:?}, got {metric}")]
    InvalidMetric { metric: String, allowed: &'static [&'static str] },

    #[error("Field {0} must not be empty")]
    EmptyField(&'static str),
}

/// A collaborator failure observed during a workflow turn.
///
/// Carried inside the response envelope so the driver loop never has to
/// handle a raised error for a single bad turn.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Agent call failed: {0}")]
    Agent(#[from] AgentError),

    #[error("Tool call failed: {0}")]
    Tool(#[from] ToolError),
}

/// Coarse classification of a workflow failure, exposed to drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowErrorKind {
    Agent,
    Tool,
}

impl WorkflowError {
    pub fn kind(&self) -> WorkflowErrorKind {
        match self {
            Self::Agent(_) => WorkflowErrorKind::Agent,
            Self::Tool(_) => WorkflowErrorKind::Tool,
        }
    }
}

/// Result type alias for the planner.
pub type Result<T> = std::result::Result<T, Error>;
