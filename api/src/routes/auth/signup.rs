use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{MessageResponse, SignupRequest};
use crate::handlers::error::{handle_domain_error, validation_error_response};

use srm_core::errors::DomainError;
use srm_core::repositories::{TokenStore, UserRepository};
use srm_core::services::auth::{CooldownPurpose, LinkPurpose};
use srm_core::services::email::templates;
use srm_shared::utils::validation::is_allowed_redirect_uri;

use super::{spawn_email, AppState};

/// Handler for POST /api/v1/auth/signup
///
/// Creates an unverified account and sends the verification email.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "alice",
///     "email": "alice@example.com",
///     "password": "string (8-128 chars)",
///     "redirect_uri": "https://app.example.com/verify/"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// { "message": "Account created! Email sent successfully" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid body, disallowed redirect_uri, or duplicate email
/// - 500 Internal Server Error: Persistence or signing failure
pub async fn signup<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<SignupRequest>,
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

    match state
        .auth_service
        .signup(&request.name, &request.email, &request.password)
        .await
    {
        Ok(user) => {
            let link_token = match state.link_tokens.encode(&user.email, LinkPurpose::VerifyEmail)
            {
                Ok(token) => token,
                Err(error) => return handle_domain_error(&error),
            };

            let link = format!("{}{}", request.redirect_uri, link_token);
            let (subject, body) = templates::verification_email(&link);
            spawn_email(state.email.clone(), vec![user.email.clone()], subject, body);

            if let Err(error) = state
                .cooldowns
                .mark(CooldownPurpose::EmailVerification, &user.email)
                .await
            {
                log::warn!("Failed to record verification cooldown: {}", error);
            }

            HttpResponse::Created()
                .json(MessageResponse::new("Account created! Email sent successfully"))
        }
        Err(error) => handle_domain_error(&error),
    }
}
