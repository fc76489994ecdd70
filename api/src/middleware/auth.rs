//! Bearer token guards for protected endpoints.
//!
//! One parameterized extractor covers both token kinds: `TokenGuard<false>`
//! requires an access token, `TokenGuard<true>` a refresh token. The guard
//! runs the full verification chain - header extraction, decode, kind
//! check, user resolution, store record check - before the handler body
//! executes.

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::sync::Arc;

use srm_core::domain::entities::token::{Claims, TokenKind};
use srm_core::domain::entities::user::User;
use srm_core::errors::{DomainError, TokenError};
use srm_core::repositories::{TokenStore, UserRepository};
use srm_core::services::auth::{AuthService, AuthenticatedUser};

use crate::handlers::error::ApiError;

/// Trait wrapping the authentication service for dynamic dispatch, so the
/// non-generic guard extractor can reach the generic service through app
/// data.
#[async_trait]
pub trait BearerAuthenticator: Send + Sync {
    /// Run the guard chain for a bearer string of the required kind
    async fn authenticate_bearer(
        &self,
        bearer: &str,
        required: TokenKind,
    ) -> Result<AuthenticatedUser, DomainError>;
}

#[async_trait]
impl<U, S> BearerAuthenticator for AuthService<U, S>
where
    U: UserRepository + 'static,
    S: TokenStore + 'static,
{
    async fn authenticate_bearer(
        &self,
        bearer: &str,
        required: TokenKind,
    ) -> Result<AuthenticatedUser, DomainError> {
        self.authenticate(bearer, required).await
    }
}

/// App-data container holding the authenticator used by the guards
pub struct AuthGuards {
    authenticator: Arc<dyn BearerAuthenticator>,
}

impl AuthGuards {
    /// Wrap an authenticator for injection via `web::Data`
    pub fn new(authenticator: Arc<dyn BearerAuthenticator>) -> Self {
        Self { authenticator }
    }

    /// The wrapped authenticator
    pub fn authenticator(&self) -> &Arc<dyn BearerAuthenticator> {
        &self.authenticator
    }
}

/// Validated bearer token guard, parameterized by the required kind
#[derive(Debug, Clone)]
pub struct TokenGuard<const REFRESH: bool> {
    /// Claims decoded from the presented token
    pub claims: Claims,
    /// User resolved during verification
    pub user: User,
}

/// Guard requiring a valid, non-revoked access token
pub type AccessBearer = TokenGuard<false>;

/// Guard requiring a valid, non-revoked refresh token
pub type RefreshBearer = TokenGuard<true>;

impl<const REFRESH: bool> FromRequest for TokenGuard<REFRESH> {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let guards = req
                .app_data::<web::Data<AuthGuards>>()
                .cloned()
                .ok_or_else(|| {
                    ApiError(DomainError::Internal {
                        message: "Authentication is not configured".to_string(),
                    })
                })?;

            // Absent header and malformed scheme are indistinguishable from
            // an invalid token on purpose
            let bearer = extract_bearer_token(&req)
                .ok_or(ApiError(DomainError::Token(TokenError::InvalidToken)))?;

            let required = if REFRESH {
                TokenKind::Refresh
            } else {
                TokenKind::Access
            };

            let authenticated = guards
                .authenticator()
                .authenticate_bearer(&bearer, required)
                .await
                .map_err(ApiError)?;

            Ok(TokenGuard {
                claims: authenticated.claims,
                user: authenticated.user,
            })
        })
    }
}

/// Extracts the Bearer credential from the Authorization header
fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_bearer_token() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_http_request();

        assert_eq!(
            extract_bearer_token(&req),
            Some("test_token_123".to_string())
        );

        let req_no_bearer = TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_http_request();

        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_no_header = TestRequest::default().to_http_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }
}
