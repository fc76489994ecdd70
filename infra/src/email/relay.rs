//! HTTP mail relay implementation of the email port.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};

use srm_core::errors::DomainError;
use srm_core::services::email::EmailService;
use srm_shared::config::MailConfig;

/// Email service posting messages to an HTTP relay endpoint
pub struct HttpRelayEmailService {
    http: reqwest::Client,
    config: MailConfig,
}

#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from_name: &'a str,
    from_address: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

impl HttpRelayEmailService {
    /// Create a new relay client
    pub fn new(config: MailConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl EmailService for HttpRelayEmailService {
    async fn send(
        &self,
        recipients: Vec<String>,
        subject: String,
        html_body: String,
    ) -> Result<(), DomainError> {
        debug!(recipients = recipients.len(), %subject, "sending email via relay");

        let message = RelayMessage {
            from_name: &self.config.from_name,
            from_address: &self.config.from_address,
            to: &recipients,
            subject: &subject,
            html: &html_body,
        };

        let response = self
            .http
            .post(&self.config.relay_url)
            .bearer_auth(&self.config.api_key)
            .json(&message)
            .send()
            .await
            .map_err(|e| {
                error!("Mail relay request failed: {}", e);
                DomainError::External {
                    service: "mail".to_string(),
                    message: e.to_string(),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!("Mail relay rejected message with status {}", status);
            return Err(DomainError::External {
                service: "mail".to_string(),
                message: format!("relay returned {}", status),
            });
        }

        Ok(())
    }
}
