//! OpenAI-compatible chat completion client implementing the core
//! `CompletionClient` port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use srm_core::errors::DomainError;
use srm_core::services::ai::CompletionClient;
use srm_shared::config::AiConfig;

/// Chat completion client for any OpenAI-compatible endpoint
pub struct ChatCompletionClient {
    http: reqwest::Client,
    config: AiConfig,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl ChatCompletionClient {
    /// Create a new client from configuration
    pub fn new(config: AiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn external_error(&self, message: impl Into<String>) -> DomainError {
        DomainError::External {
            service: "ai".to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        debug!(model = %self.config.model, "requesting chat completion");

        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a helpful assistant.",
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!(
            "{}/chat/completions",
            self.config.api_url.trim_end_matches('/')
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("AI API request failed: {}", e);
                self.external_error(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!("AI API returned status {}", status);
            return Err(self.external_error(format!("completion endpoint returned {}", status)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| self.external_error(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| self.external_error("completion contained no choices"))
    }
}
