use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::reddit::{FormatPostRequest, FormattedPostResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::middleware::auth::AccessBearer;

use srm_core::domain::entities::user::UserRole;
use srm_core::repositories::{TokenStore, UserRepository};
use srm_core::services::auth::RoleGate;

use super::super::AppState;

/// Handler for POST /api/v1/reddit/format_post
///
/// Rewrites a post draft to satisfy a target subreddit's rules.
///
/// # Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 403 Forbidden: Account not verified or role not allowed
/// - 502 Bad Gateway: AI API failure
pub async fn format_post<U, S>(
    state: web::Data<AppState<U, S>>,
    auth: AccessBearer,
    request: web::Json<FormatPostRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: TokenStore + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    let gate = RoleGate::new(vec![UserRole::User, UserRole::Admin]);
    if let Err(error) = gate.authorize(&auth.user) {
        return handle_domain_error(&error);
    }

    match state
        .advisor
        .format_post(
            &request.post,
            &request.subreddit_name,
            &request.subreddit_rules,
        )
        .await
    {
        Ok(formatted_post) => HttpResponse::Ok().json(FormattedPostResponse { formatted_post }),
        Err(error) => handle_domain_error(&error),
    }
}
