use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{
    MessageResponse, PasswordResetConfirmRequest, PasswordResetRequest,
};
use crate::handlers::error::{handle_domain_error, validation_error_response};

use srm_core::errors::{AuthError, DomainError};
use srm_core::repositories::{TokenStore, UserRepository};
use srm_core::services::auth::{CooldownPurpose, LinkPurpose};
use srm_core::services::email::templates;
use srm_shared::types::response::ErrorResponse;
use srm_shared::utils::validation::is_allowed_redirect_uri;

use super::{spawn_email, AppState};

/// Handler for POST /api/v1/auth/password_reset
///
/// Sends a password-reset link to an existing account, throttled per
/// email.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "alice@example.com",
///     "redirect_uri": "https://app.example.com/password_reset/"
/// }
/// ```
///
/// # Errors
/// - 405 Method Not Allowed: No account with this email
/// - 429 Too Many Requests: Cooldown still active
pub async fn password_reset<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<PasswordResetRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: TokenStore + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    if !is_allowed_redirect_uri(&request.redirect_uri, &state.config.server.frontend_origins) {
        return handle_domain_error(&DomainError::Validation {
            message: "redirect_uri is not an allowed origin".to_string(),
        });
    }

    match state.auth_service.get_user_by_email(&request.email).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return HttpResponse::MethodNotAllowed().json(ErrorResponse::new(
                "user_not_found",
                "There is no account with this email!",
            ));
        }
        Err(error) => return handle_domain_error(&error),
    }

    if let Err(error) = state
        .cooldowns
        .ensure_clear(CooldownPurpose::PasswordReset, &request.email)
        .await
    {
        return handle_domain_error(&error);
    }

    let link_token = match state
        .link_tokens
        .encode(&request.email, LinkPurpose::ResetPassword)
    {
        Ok(token) => token,
        Err(error) => return handle_domain_error(&error),
    };

    let link = format!("{}{}", request.redirect_uri, link_token);
    let (subject, body) = templates::password_reset_email(&link);
    spawn_email(
        state.email.clone(),
        vec![request.email.clone()],
        subject,
        body,
    );

    if let Err(error) = state
        .cooldowns
        .mark(CooldownPurpose::PasswordReset, &request.email)
        .await
    {
        log::warn!("Failed to record password reset cooldown: {}", error);
    }

    HttpResponse::Ok().json(MessageResponse::new("Email sent successfully"))
}

/// Handler for POST /api/v1/auth/password_reset_confirm/{token}
///
/// Sets a new password via the signed link token from the reset email,
/// then revokes every session of the user.
///
/// # Request Body
///
/// ```json
/// {
///     "new_password": "string (8-128 chars)",
///     "confirm_new_password": "string"
/// }
/// ```
///
/// # Errors
/// - 400 Bad Request: Passwords do not match, or invalid link token
/// - 404 Not Found: Account no longer exists
pub async fn password_reset_confirm<U, S>(
    state: web::Data<AppState<U, S>>,
    path: web::Path<String>,
    request: web::Json<PasswordResetConfirmRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: TokenStore + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    if request.new_password != request.confirm_new_password {
        return handle_domain_error(&DomainError::Auth(AuthError::PasswordMismatch));
    }

    let token = path.into_inner();
    let email = match state.link_tokens.decode(&token, LinkPurpose::ResetPassword) {
        Ok(email) => email,
        Err(error) => return handle_domain_error(&error),
    };

    match state
        .auth_service
        .reset_password(&email, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Password reset successfully")),
        Err(error) => handle_domain_error(&error),
    }
}
