//! Outbound email port
//!
//! Delivery itself is an external concern; the core only defines the port,
//! the message templates, and a recording mock for tests.

pub mod templates;

mod mock;

pub use mock::{MockEmailService, SentEmail};

use async_trait::async_trait;

use crate::errors::DomainError;

/// Port for outbound email delivery.
///
/// Callers treat sends as fire-and-forget: the HTTP layer spawns the send
/// and never blocks a response on it.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send an HTML email to the given recipients
    async fn send(
        &self,
        recipients: Vec<String>,
        subject: String,
        html_body: String,
    ) -> Result<(), DomainError>;
}
