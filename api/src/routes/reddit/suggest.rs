use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::reddit::{SuggestSubredditsRequest, SuggestionsResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::middleware::auth::AccessBearer;

use srm_core::domain::entities::user::UserRole;
use srm_core::repositories::{TokenStore, UserRepository};
use srm_core::services::auth::RoleGate;

use super::super::AppState;

/// Handler for POST /api/v1/reddit/suggest_subreddits
///
/// Suggests 3-5 subreddits for a post draft, each enriched with subscriber
/// count and posting rules.
///
/// # Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 403 Forbidden: Account not verified or role not allowed
/// - 502 Bad Gateway: AI or Reddit API failure
pub async fn suggest_subreddits<U, S>(
    state: web::Data<AppState<U, S>>,
    auth: AccessBearer,
    request: web::Json<SuggestSubredditsRequest>,
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

    match state.advisor.suggest_subreddits(&request.post).await {
        Ok(suggestions) => HttpResponse::Ok().json(SuggestionsResponse { suggestions }),
        Err(error) => handle_domain_error(&error),
    }
}
