use actix_web::{http::header, web, HttpResponse};
use uuid::Uuid;

use crate::dto::auth::{OauthCallbackQuery, OauthLoginQuery, OauthTokensQuery, OauthTokensResponse};
use crate::handlers::error::handle_domain_error;

use srm_core::errors::DomainError;
use srm_core::repositories::{TokenStore, UserRepository};
use srm_core::services::auth::OauthProvider;
use srm_shared::types::response::ErrorResponse;
use srm_shared::utils::validation::is_allowed_redirect_uri;

use super::AppState;

fn callback_url(public_url: &str) -> String {
    format!(
        "{}/api/v1/auth/google/callback",
        public_url.trim_end_matches('/')
    )
}

fn provider_or_unconfigured<'a, U, S>(
    state: &'a AppState<U, S>,
) -> Result<&'a std::sync::Arc<dyn OauthProvider>, HttpResponse>
where
    U: UserRepository,
    S: TokenStore,
{
    state.oauth.as_ref().ok_or_else(|| {
        HttpResponse::NotImplemented().json(ErrorResponse::new(
            "oauth_not_configured",
            "Google login is not configured on this server",
        ))
    })
}

/// Handler for GET /api/v1/auth/google/login
///
/// Starts the Google authorization-code flow. The front-end redirect URI
/// is staged under the `state` parameter and the browser is redirected to
/// the consent screen.
///
/// # Query Parameters
/// - `redirect_uri`: front-end URI the browser returns to afterwards
pub async fn google_login<U, S>(
    state: web::Data<AppState<U, S>>,
    query: web::Query<OauthLoginQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: TokenStore + 'static,
{
    let provider = match provider_or_unconfigured(&state) {
        Ok(provider) => provider,
        Err(response) => return response,
    };

    if !is_allowed_redirect_uri(&query.redirect_uri, &state.config.server.frontend_origins) {
        return handle_domain_error(&DomainError::Validation {
            message: "redirect_uri is not an allowed origin".to_string(),
        });
    }

    let oauth_state = Uuid::new_v4().to_string();
    if let Err(error) = state
        .auth_service
        .tokens()
        .stage_oauth_state(&oauth_state, &query.redirect_uri)
        .await
    {
        return handle_domain_error(&error);
    }

    let location =
        provider.authorize_url(&oauth_state, &callback_url(&state.config.server.public_url));

    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Handler for GET /api/v1/auth/google/callback
///
/// Completes the code exchange, signs the user in (creating or linking the
/// account), stages the issued pair under a fresh one-shot state and
/// redirects back to the front-end with that state.
pub async fn google_callback<U, S>(
    state: web::Data<AppState<U, S>>,
    query: web::Query<OauthCallbackQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: TokenStore + 'static,
{
    let provider = match provider_or_unconfigured(&state) {
        Ok(provider) => provider,
        Err(response) => return response,
    };

    let frontend_redirect = match state
        .auth_service
        .tokens()
        .take_oauth_state(&query.state)
        .await
    {
        Ok(Some(uri)) => uri,
        Ok(None) => {
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "invalid_state",
                "Invalid or expired state",
            ));
        }
        Err(error) => return handle_domain_error(&error),
    };

    let profile = match provider
        .exchange_code(&query.code, &callback_url(&state.config.server.public_url))
        .await
    {
        Ok(profile) => profile,
        Err(error) => return handle_domain_error(&error),
    };

    let pair = match state.auth_service.oauth_login(&profile).await {
        Ok(pair) => pair,
        Err(error) => return handle_domain_error(&error),
    };

    let handoff_state = Uuid::new_v4().to_string();
    if let Err(error) = state
        .auth_service
        .tokens()
        .stage_handoff(&handoff_state, &pair)
        .await
    {
        return handle_domain_error(&error);
    }

    HttpResponse::Found()
        .insert_header((
            header::LOCATION,
            format!("{}?state={}", frontend_redirect, handoff_state),
        ))
        .finish()
}

/// Handler for GET /api/v1/auth/oauth/tokens
///
/// One-shot retrieval of a token pair staged by the OAuth callback. The
/// state is consumed on first read; a second read fails.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "bearer"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Unknown, expired or already-consumed state
pub async fn oauth_tokens<U, S>(
    state: web::Data<AppState<U, S>>,
    query: web::Query<OauthTokensQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: TokenStore + 'static,
{
    match state.auth_service.tokens().take_handoff(&query.state).await {
        Ok(Some(pair)) => HttpResponse::Ok().json(OauthTokensResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "bearer".to_string(),
        }),
        Ok(None) => HttpResponse::BadRequest().json(ErrorResponse::new(
            "invalid_state",
            "Invalid or expired state",
        )),
        Err(error) => handle_domain_error(&error),
    }
}
