//! Wellness Assist — stage-gated wellness planning agent core.

pub mod agents;
pub mod config;
pub mod context;
pub mod error;
pub mod guardrails;
pub mod llm;
pub mod tools;
pub mod workflow;
