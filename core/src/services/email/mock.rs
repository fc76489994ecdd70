//! Recording mock implementation of the email port

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::EmailService;

/// A message captured by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub recipients: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

/// Mock email service recording every send
#[derive(Default)]
pub struct MockEmailService {
    sent: Arc<RwLock<Vec<SentEmail>>>,
}

impl MockEmailService {
    /// Create a new mock with an empty outbox
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages captured so far
    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }

    /// Number of captured messages
    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(
        &self,
        recipients: Vec<String>,
        subject: String,
        html_body: String,
    ) -> Result<(), DomainError> {
        self.sent.write().await.push(SentEmail {
            recipients,
            subject,
            html_body,
        });
        Ok(())
    }
}
