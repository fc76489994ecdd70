//! Domain-specific error types for authentication and token operations
//!
//! Error messages here are monolingual; the presentation layer owns the
//! mapping to HTTP status codes and machine-readable error codes.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("User with this email already exists")]
    UserAlreadyExists,

    #[error("Account not verified")]
    AccountNotVerified,

    #[error("Account already verified")]
    AlreadyVerified,

    #[error("Insufficient permission")]
    InsufficientPermission,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please wait {seconds} seconds before resending")]
    CooldownActive { seconds: i64 },

    #[error("OAuth authentication failed")]
    OauthFailed,
}

/// Token-related errors
///
/// `InvalidToken` deliberately covers malformed, unsigned, expired and
/// revoked tokens alike so responses never reveal which check failed.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Access token required")]
    AccessTokenRequired,

    #[error("Refresh token required")]
    RefreshTokenRequired,

    #[error("Invalid or expired link token")]
    InvalidLinkToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Token store unavailable")]
    StoreUnavailable,
}
