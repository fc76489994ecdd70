use actix_web::{web, HttpResponse};

use crate::dto::auth::RefreshResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::RefreshBearer;

use srm_core::repositories::{TokenStore, UserRepository};

use super::AppState;

/// Handler for POST /api/v1/auth/refresh_token
///
/// Rotates a refresh token: the presented pair is revoked through the
/// refresh→access mapping record and a brand-new pair is issued. Re-using
/// the old refresh token afterwards fails with 401.
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
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid, revoked or wrong-kind token
pub async fn refresh<U, S>(
    state: web::Data<AppState<U, S>>,
    auth: RefreshBearer,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: TokenStore + 'static,
{
    match state.auth_service.rotate(&auth.user, &auth.claims.jti).await {
        Ok(pair) => HttpResponse::Ok().json(RefreshResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }),
        Err(error) => handle_domain_error(&error),
    }
}
