//! Signed tokens embedded in email verification and password-reset links.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, TokenError};

/// What a link token authorizes its holder to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkPurpose {
    /// Confirm ownership of the email address
    VerifyEmail,
    /// Set a new password
    ResetPassword,
}

#[derive(Debug, Serialize, Deserialize)]
struct LinkClaims {
    /// Email address the link was sent to
    sub: String,
    /// Purpose this token was minted for
    purpose: LinkPurpose,
    exp: i64,
    iat: i64,
}

/// Codec for short-lived signed link tokens.
///
/// Uses the JWT secret with a fixed salt, so session tokens and link tokens
/// can never validate against each other's keys.
pub struct LinkTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl LinkTokenCodec {
    const SALT: &'static str = "email-configuration";

    /// Creates a codec from the JWT secret and a lifetime in hours
    pub fn new(secret: &str, lifetime_hours: i64) -> Self {
        let salted = format!("{}:{}", secret, Self::SALT);
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(salted.as_bytes()),
            decoding_key: DecodingKey::from_secret(salted.as_bytes()),
            validation,
            lifetime: Duration::hours(lifetime_hours),
        }
    }

    /// Mints a link token for an email and purpose
    pub fn encode(&self, email: &str, purpose: LinkPurpose) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = LinkClaims {
            sub: email.to_string(),
            purpose,
            exp: (now + self.lifetime).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies a link token and returns the embedded email.
    ///
    /// Fails with `InvalidLinkToken` on signature mismatch, expiry, or a
    /// purpose other than the expected one.
    pub fn decode(&self, token: &str, expected: LinkPurpose) -> Result<String, DomainError> {
        let claims = decode::<LinkClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| DomainError::Token(TokenError::InvalidLinkToken))?;

        if claims.purpose != expected {
            return Err(DomainError::Token(TokenError::InvalidLinkToken));
        }

        Ok(claims.sub)
    }
}
