//! Outbound email configuration

use serde::{Deserialize, Serialize};

/// Email relay configuration
///
/// Delivery goes through an HTTP relay endpoint; SMTP details live behind
/// the relay and are not this service's concern.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// HTTP endpoint of the mail relay
    pub relay_url: String,

    /// API key for the relay
    pub api_key: String,

    /// Display name used as the sender
    pub from_name: String,

    /// Sender address
    pub from_address: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            relay_url: String::from("http://localhost:8025/api/send"),
            api_key: String::new(),
            from_name: String::from("SubRMatch"),
            from_address: String::from("no-reply@subrmatch.local"),
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            relay_url: std::env::var("MAIL_RELAY_URL")
                .unwrap_or_else(|_| "http://localhost:8025/api/send".to_string()),
            api_key: std::env::var("MAIL_RELAY_API_KEY").unwrap_or_default(),
            from_name: std::env::var("MAIL_FROM_NAME")
                .unwrap_or_else(|_| "SubRMatch".to_string()),
            from_address: std::env::var("MAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| "no-reply@subrmatch.local".to_string()),
        }
    }
}
