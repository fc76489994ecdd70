use actix_web::HttpResponse;

use crate::dto::auth::MeResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AccessBearer;

use srm_core::domain::entities::user::UserRole;
use srm_core::services::auth::RoleGate;

/// Handler for POST /api/v1/auth/me
///
/// Returns the authenticated user's profile. Requires a verified account
/// holding the `user` or `admin` role.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "user": { "id": "...", "name": "alice", "email": "...", "role": "user", ... } }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 403 Forbidden: Account not verified, or role not allowed
pub async fn me(auth: AccessBearer) -> HttpResponse {
    let gate = RoleGate::new(vec![UserRole::User, UserRole::Admin]);
    if let Err(error) = gate.authorize(&auth.user) {
        return handle_domain_error(&error);
    }

    HttpResponse::Ok().json(MeResponse {
        user: auth.user.safe(),
    })
}
