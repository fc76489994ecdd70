//! Per-email throttling of outbound verification and reset mails.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::{AuthError, DomainError};
use crate::repositories::TokenStore;

/// The flows whose sends are throttled independently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownPurpose {
    /// Email-verification links
    EmailVerification,
    /// Password-reset links
    PasswordReset,
}

impl CooldownPurpose {
    fn key_prefix(&self) -> &'static str {
        match self {
            CooldownPurpose::EmailVerification => "email_verification",
            CooldownPurpose::PasswordReset => "password_reset_email",
        }
    }
}

/// Marker stored per email per purpose, carrying the send timestamp
#[derive(Debug, Serialize, Deserialize)]
struct CooldownMarker {
    time: i64,
}

/// Throttles repeat sends using ephemeral store markers.
///
/// Markers expire via TTL, so a lost delete never locks an address out for
/// longer than the window.
pub struct CooldownService<S: TokenStore> {
    store: Arc<S>,
    window_seconds: i64,
}

impl<S: TokenStore> CooldownService<S> {
    /// Creates a cooldown service with the configured window
    pub fn new(store: Arc<S>, window_seconds: i64) -> Self {
        Self {
            store,
            window_seconds,
        }
    }

    fn key(purpose: CooldownPurpose, email: &str) -> String {
        format!("{}:{}", purpose.key_prefix(), email)
    }

    /// Fails with `CooldownActive` if a send happened inside the window.
    ///
    /// A marker that cannot be parsed is treated as absent.
    pub async fn ensure_clear(
        &self,
        purpose: CooldownPurpose,
        email: &str,
    ) -> Result<(), DomainError> {
        let Some(raw) = self.store.get(&Self::key(purpose, email)).await? else {
            return Ok(());
        };

        let Ok(marker) = serde_json::from_str::<CooldownMarker>(&raw) else {
            return Ok(());
        };

        let elapsed = Utc::now().timestamp() - marker.time;
        if elapsed < self.window_seconds {
            return Err(AuthError::CooldownActive {
                seconds: self.window_seconds - elapsed,
            }
            .into());
        }

        Ok(())
    }

    /// Records a send, opening a new cooldown window
    pub async fn mark(&self, purpose: CooldownPurpose, email: &str) -> Result<(), DomainError> {
        let marker = CooldownMarker {
            time: Utc::now().timestamp(),
        };
        let value = serde_json::to_string(&marker).map_err(|e| DomainError::Internal {
            message: format!("Failed to serialize cooldown marker: {}", e),
        })?;

        self.store
            .set_with_expiry(
                &Self::key(purpose, email),
                &value,
                self.window_seconds.max(0) as u64,
            )
            .await
    }
}
