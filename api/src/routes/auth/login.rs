use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};

use srm_core::repositories::{TokenStore, UserRepository};

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Verifies credentials and issues a fresh access/refresh pair.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "alice@example.com",
///     "password": "string"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Login successful",
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 403 Forbidden: Invalid credentials (unknown email, wrong password, or
///   OAuth-only account - deliberately indistinguishable)
pub async fn login<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: TokenStore + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(LoginResponse {
            message: "Login successful".to_string(),
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }),
        Err(error) => handle_domain_error(&error),
    }
}
