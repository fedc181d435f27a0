//! LLM integration for Wellness Assist.
//!
//! A single `LlmProvider` trait with an HTTP implementation speaking an
//! OpenAI-compatible chat completions API. No retry, no streaming — a failed
//! call surfaces as an `LlmError` and the workflow turn degrades softly.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::ExposeSecret;

use crate::config::LlmConfig;
use crate::error::LlmError;

/// Text completion backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Model identifier, for logging.
    fn model_name(&self) -> &str;

    /// Complete a prompt into a single text response.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Create an LLM provider from configuration.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let provider = HttpProvider::new(config)?;
    tracing::info!("Using model {} at {}", config.model, config.api_base);
    Ok(Arc::new(provider))
}

/// `LlmProvider` over an OpenAI-compatible `/chat/completions` endpoint.
pub struct HttpProvider {
    client: reqwest::Client,
    config: LlmConfig,
}

impl HttpProvider {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| LlmError::RequestFailed {
                provider: config.api_base.clone(),
                reason: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl LlmProvider for HttpProvider {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.config.api_base);
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt}],
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: self.config.api_base.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::RequestFailed {
                provider: self.config.api_base.clone(),
                reason: format!("HTTP {status}: {text}"),
            });
        }

        let payload: serde_json::Value =
            response.json().await.map_err(|e| LlmError::InvalidResponse {
                provider: self.config.api_base.clone(),
                reason: e.to_string(),
            })?;

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: self.config.api_base.clone(),
                reason: "Missing choices[0].message.content".to_string(),
            })
    }
}
