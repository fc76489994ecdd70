use actix_web::{web, HttpResponse};

use crate::dto::auth::{MessageResponse, ResendVerificationQuery};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AccessBearer;

use srm_core::errors::{AuthError, DomainError};
use srm_core::repositories::{TokenStore, UserRepository};
use srm_core::services::auth::{CooldownPurpose, LinkPurpose};
use srm_core::services::email::templates;
use srm_shared::utils::validation::is_allowed_redirect_uri;

use super::{spawn_email, AppState};

/// Handler for POST /api/v1/auth/resend_verification
///
/// Re-sends the verification email for the authenticated account,
/// throttled by the per-email cooldown.
///
/// # Query Parameters
/// - `redirect_uri`: front-end URI prefix the link token is appended to
///
/// # Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 405 Method Not Allowed: Account is already verified
/// - 429 Too Many Requests: Cooldown still active
pub async fn resend_verification<U, S>(
    state: web::Data<AppState<U, S>>,
    auth: AccessBearer,
    query: web::Query<ResendVerificationQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: TokenStore + 'static,
{
    if !is_allowed_redirect_uri(&query.redirect_uri, &state.config.server.frontend_origins) {
        return handle_domain_error(&DomainError::Validation {
            message: "redirect_uri is not an allowed origin".to_string(),
        });
    }

    let email = auth.user.email.clone();

    if let Err(error) = state
        .cooldowns
        .ensure_clear(CooldownPurpose::EmailVerification, &email)
        .await
    {
        return handle_domain_error(&error);
    }

    if auth.user.is_verified {
        return handle_domain_error(&DomainError::Auth(AuthError::AlreadyVerified));
    }

    let link_token = match state.link_tokens.encode(&email, LinkPurpose::VerifyEmail) {
        Ok(token) => token,
        Err(error) => return handle_domain_error(&error),
    };

    let link = format!("{}{}", query.redirect_uri, link_token);
    let (subject, body) = templates::verification_email(&link);
    spawn_email(state.email.clone(), vec![email.clone()], subject, body);

    if let Err(error) = state
        .cooldowns
        .mark(CooldownPurpose::EmailVerification, &email)
        .await
    {
        log::warn!("Failed to record verification cooldown: {}", error);
    }

    HttpResponse::Ok().json(MessageResponse::new("Email sent successfully"))
}
