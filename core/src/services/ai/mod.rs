//! AI completion port and the post advisor built on top of it.

mod advisor;
pub mod prompts;

pub use advisor::PostAdvisor;

use async_trait::async_trait;

use crate::errors::DomainError;

/// Port for an OpenAI-style chat completion API
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run a single-prompt completion and return the response text
    async fn complete(&self, prompt: &str) -> Result<String, DomainError>;
}
