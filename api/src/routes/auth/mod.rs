//! Authentication route handlers
//!
//! This module contains all authentication-related endpoints including:
//! - Signup and login with email/password
//! - Token refresh and logout
//! - Email verification and password reset flows
//! - Google OAuth login with one-shot token hand-off

pub mod login;
pub mod logout;
pub mod me;
pub mod oauth;
pub mod password_reset;
pub mod refresh;
pub mod resend_verification;
pub mod signup;
pub mod verify;

use std::sync::Arc;

use srm_core::repositories::{TokenStore, UserRepository};
use srm_core::services::ai::PostAdvisor;
use srm_core::services::auth::{AuthService, CooldownService, LinkTokenCodec, OauthProvider};
use srm_core::services::email::EmailService;
use srm_shared::config::AppConfig;

/// Application state that holds shared services
pub struct AppState<U, S>
where
    U: UserRepository,
    S: TokenStore,
{
    pub auth_service: Arc<AuthService<U, S>>,
    pub cooldowns: Arc<CooldownService<S>>,
    pub link_tokens: Arc<LinkTokenCodec>,
    pub email: Arc<dyn EmailService>,
    pub oauth: Option<Arc<dyn OauthProvider>>,
    pub advisor: Arc<PostAdvisor>,
    pub config: Arc<AppConfig>,
}

/// Fire-and-forget email dispatch: the response never waits on delivery
pub(crate) fn spawn_email(
    email: Arc<dyn EmailService>,
    recipients: Vec<String>,
    subject: String,
    html_body: String,
) {
    tokio::spawn(async move {
        if let Err(error) = email.send(recipients, subject, html_body).await {
            log::error!("Failed to send email: {}", error);
        }
    });
}
