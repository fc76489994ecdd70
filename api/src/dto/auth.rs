//! Authentication request/response DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use srm_core::domain::entities::user::SafeUser;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name
    #[validate(length(min = 1, max = 50))]
    pub name: String,

    /// Email address, unique per account
    #[validate(email)]
    pub email: String,

    /// Plain password, hashed before storage
    #[validate(length(min = 8, max = 128))]
    pub password: String,

    /// Front-end URI prefix the verification link is appended to
    #[validate(length(min = 1))]
    pub redirect_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: SafeUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendVerificationQuery {
    /// Front-end URI prefix the verification link is appended to
    pub redirect_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email)]
    pub email: String,

    /// Front-end URI prefix the reset link is appended to
    #[validate(length(min = 1))]
    pub redirect_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordResetConfirmRequest {
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,

    #[validate(length(min = 8, max = 128))]
    pub confirm_new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OauthLoginQuery {
    /// Front-end URI the browser returns to after the OAuth dance
    pub redirect_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OauthCallbackQuery {
    pub code: String,
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OauthTokensQuery {
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OauthTokensResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}
