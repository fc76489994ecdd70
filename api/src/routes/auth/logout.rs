use actix_web::{web, HttpResponse};

use crate::dto::auth::MessageResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::RefreshBearer;

use srm_core::repositories::{TokenStore, UserRepository};

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Logs out the presented session: the refresh token, its paired access
/// token and the mapping record between them are deleted. Other sessions
/// of the same user stay valid.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {refresh_token}
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "message": "Logout successful" }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid, revoked or wrong-kind token
pub async fn logout<U, S>(state: web::Data<AppState<U, S>>, auth: RefreshBearer) -> HttpResponse
where
    U: UserRepository + 'static,
    S: TokenStore + 'static,
{
    match state
        .auth_service
        .logout(auth.user.id, &auth.claims.jti)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Logout successful")),
        Err(error) => handle_domain_error(&error),
    }
}
