//! Completion service boundary and its Groq implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::core::config::ConverterConfig;
use crate::core::errors::{ClientError, ConfigError, Result};
use crate::core::models::Completion;

/// Anything that can turn a prompt into text.
///
/// The converter only depends on this trait, so the model provider can be
/// swapped and tests can plug in a stub.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Produce a completion for `prompt`, generating at most `max_tokens`
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<Completion>;
}

#[async_trait]
impl<T: TextCompletion + ?Sized> TextCompletion for std::sync::Arc<T> {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<Completion> {
        (**self).complete(prompt, max_tokens).await
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: Option<u64>,
}

/// Client for Groq's OpenAI-compatible chat completions API.
///
/// One attempt per call: no retry, and no timeout beyond whatever the
/// service applies.
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    api_endpoint: String,
    model: String,
}

impl GroqClient {
    /// Create a new client from a validated configuration
    pub fn new(config: &ConverterConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                name: "http_client".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_endpoint: config.api_endpoint.clone(),
            model: config.model.clone(),
        })
    }

    /// Model identifier sent with every request
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextCompletion for GroqClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<Completion> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
        };

        debug!(
            "Sending {} prompt bytes to {} (model {}, max_tokens {})",
            prompt.len(),
            self.api_endpoint,
            self.model,
            max_tokens
        );

        let response = self
            .client
            .post(&self.api_endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let parsed: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| ClientError::InvalidResponseError {
                    message: e.to_string(),
                })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or_else(|| ClientError::InvalidResponseError {
                message: "No completion in response".to_string(),
            })?;

        let mut completion = Completion::new(text, parsed.model.unwrap_or_else(|| self.model.clone()));
        if let Some(tokens) = parsed.usage.and_then(|u| u.total_tokens) {
            completion = completion.with_tokens_used(tokens);
        }

        Ok(completion)
    }
}
