use actix_web::{web, HttpResponse};

use crate::dto::auth::MessageResponse;
use crate::handlers::error::handle_domain_error;

use srm_core::repositories::{TokenStore, UserRepository};
use srm_core::services::auth::LinkPurpose;

use super::AppState;

/// Handler for POST /api/v1/auth/verify/{token}
///
/// Confirms ownership of an email address via the signed link token from
/// the verification email and marks the account verified.
///
/// # Errors
/// - 400 Bad Request: Invalid, expired or wrong-purpose link token
/// - 404 Not Found: Account no longer exists
pub async fn verify<U, S>(
    state: web::Data<AppState<U, S>>,
    path: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: TokenStore + 'static,
{
    let token = path.into_inner();

    let email = match state.link_tokens.decode(&token, LinkPurpose::VerifyEmail) {
        Ok(email) => email,
        Err(error) => return handle_domain_error(&error),
    };

    match state.auth_service.verify_account(&email).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Account verified successfully")),
        Err(error) => handle_domain_error(&error),
    }
}
