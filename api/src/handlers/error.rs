//! Mapping of domain errors to HTTP responses.
//!
//! Every domain error maps to a stable machine-readable code plus a human
//! message. Guard failures short-circuit before handler bodies run; server
//! faults are logged and answered with a generic message.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use std::collections::HashMap;
use std::fmt;
use validator::ValidationErrors;

use srm_core::errors::{AuthError, DomainError, TokenError};
use srm_shared::types::response::ErrorResponse;

/// Status code and machine-readable code for a domain error
fn classify(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials => (StatusCode::FORBIDDEN, "invalid_credentials"),
            AuthError::UserNotFound => (StatusCode::NOT_FOUND, "user_not_found"),
            AuthError::UserAlreadyExists => (StatusCode::BAD_REQUEST, "user_already_exists"),
            AuthError::AccountNotVerified => (StatusCode::FORBIDDEN, "account_not_verified"),
            AuthError::AlreadyVerified => (StatusCode::METHOD_NOT_ALLOWED, "already_verified"),
            AuthError::InsufficientPermission => {
                (StatusCode::FORBIDDEN, "insufficient_permission")
            }
            AuthError::PasswordMismatch => (StatusCode::BAD_REQUEST, "password_mismatch"),
            AuthError::CooldownActive { .. } => (StatusCode::TOO_MANY_REQUESTS, "cooldown_active"),
            AuthError::OauthFailed => (StatusCode::BAD_REQUEST, "oauth_failed"),
        },
        DomainError::Token(token_error) => match token_error {
            TokenError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
            TokenError::AccessTokenRequired => (StatusCode::UNAUTHORIZED, "access_token_required"),
            TokenError::RefreshTokenRequired => {
                (StatusCode::UNAUTHORIZED, "refresh_token_required")
            }
            TokenError::InvalidLinkToken => (StatusCode::BAD_REQUEST, "invalid_link_token"),
            TokenError::TokenGenerationFailed => {
                (StatusCode::INTERNAL_SERVER_ERROR, "server_error")
            }
            TokenError::StoreUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable"),
        },
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
        DomainError::External { .. } => (StatusCode::BAD_GATEWAY, "external_service_error"),
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "server_error")
        }
    }
}

/// Convert a domain error into its HTTP response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code) = classify(error);

    let message = if status.is_server_error() {
        log::error!("{}: {:?}", code, error);
        "Oops! Something went wrong".to_string()
    } else {
        log::debug!("{}: {:?}", code, error);
        error.to_string()
    };

    let mut response = ErrorResponse::new(code, message);
    if let DomainError::Auth(AuthError::CooldownActive { seconds }) = error {
        response = response.with_detail("retry_after_seconds", json!(seconds));
    }

    HttpResponse::build(status).json(response)
}

/// Convert DTO validation failures into a 400 with per-field details
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut fields: HashMap<String, Vec<String>> = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        fields.insert(field.to_string(), messages);
    }

    let response = ErrorResponse::new("validation_error", "Invalid request data")
        .with_detail("fields", json!(fields));

    HttpResponse::BadRequest().json(response)
}

/// Domain error wrapper usable as an actix rejection, so guard extractors
/// produce the same JSON shape as handler bodies.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        classify(&self.0).0
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_failures_map_to_401() {
        for error in [
            TokenError::InvalidToken,
            TokenError::AccessTokenRequired,
            TokenError::RefreshTokenRequired,
        ] {
            let (status, _) = classify(&DomainError::Token(error));
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_role_gate_failures_map_to_403() {
        for error in [AuthError::AccountNotVerified, AuthError::InsufficientPermission] {
            let (status, _) = classify(&DomainError::Auth(error));
            assert_eq!(status, StatusCode::FORBIDDEN);
        }
    }

    #[test]
    fn test_store_failure_maps_to_503() {
        let (status, code) = classify(&DomainError::Token(TokenError::StoreUnavailable));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(code, "store_unavailable");
    }

    #[test]
    fn test_server_errors_hide_internals() {
        let error = DomainError::Internal {
            message: "connection pool exhausted".to_string(),
        };
        let response = handle_domain_error(&error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
