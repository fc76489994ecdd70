//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::SafeUser;

/// Default access token expiration time (10 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 10;

/// Default refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// The two kinds of bearer token issued as a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived token presented on ordinary requests
    Access,
    /// Long-lived token exchanged for new pairs
    Refresh,
}

impl TokenKind {
    /// String segment used inside store keys
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims structure for the JWT payload.
///
/// Carries the credential-free user projection, expiry metadata, a unique
/// token id and the flag separating refresh tokens from access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Credential-free user projection this token was minted for
    pub user: SafeUser,

    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,

    /// Issued at timestamp
    pub iat: i64,

    /// Unique identifier for this token; pairs mint one per token
    pub jti: String,

    /// Whether this is a refresh token
    pub refresh: bool,
}

impl Claims {
    /// Creates new claims for an access token
    pub fn new_access(user: SafeUser, jti: impl Into<String>, validity: Duration) -> Self {
        Self::new(user, jti, validity, false)
    }

    /// Creates new claims for a refresh token
    pub fn new_refresh(user: SafeUser, jti: impl Into<String>, validity: Duration) -> Self {
        Self::new(user, jti, validity, true)
    }

    fn new(user: SafeUser, jti: impl Into<String>, validity: Duration, refresh: bool) -> Self {
        let now = Utc::now();
        Self {
            user,
            exp: (now + validity).timestamp(),
            iat: now.timestamp(),
            jti: jti.into(),
            refresh,
        }
    }

    /// The kind of token these claims describe
    pub fn kind(&self) -> TokenKind {
        if self.refresh {
            TokenKind::Refresh
        } else {
            TokenKind::Access
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Store key for a token record: `{user_id}:{kind}:{jti}`
pub fn token_key(user_id: Uuid, kind: TokenKind, jti: &str) -> String {
    format!("{}:{}:{}", user_id, kind.as_str(), jti)
}

/// Store key for the refresh→access mapping record:
/// `{user_id}:refresh_to_access:{refresh_jti}`
pub fn refresh_to_access_key(user_id: Uuid, refresh_jti: &str) -> String {
    format!("{}:refresh_to_access:{}", user_id, refresh_jti)
}

/// Key prefixes covering every token record of a user, used by
/// revoke-everywhere flows.
pub fn revocation_prefixes(user_id: Uuid) -> [String; 3] {
    [
        format!("{}:access:", user_id),
        format!("{}:refresh:", user_id),
        format!("{}:refresh_to_access:", user_id),
    ]
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Signed refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::{User, UserRole};

    fn sample_user() -> SafeUser {
        User::new_with_password("alice", "alice@example.com", "hash".to_string()).safe()
    }

    #[test]
    fn test_access_claims() {
        let user = sample_user();
        let claims = Claims::new_access(user.clone(), "jti-1", Duration::minutes(10));

        assert_eq!(claims.user.email, "alice@example.com");
        assert_eq!(claims.user.role, UserRole::User);
        assert_eq!(claims.jti, "jti-1");
        assert!(!claims.refresh);
        assert_eq!(claims.kind(), TokenKind::Access);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_refresh_claims() {
        let claims = Claims::new_refresh(sample_user(), "jti-2", Duration::days(7));

        assert!(claims.refresh);
        assert_eq!(claims.kind(), TokenKind::Refresh);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_expired_claims() {
        let mut claims = Claims::new_access(sample_user(), "jti-3", Duration::minutes(10));
        claims.exp = Utc::now().timestamp() - 1;

        assert!(claims.is_expired());
    }

    #[test]
    fn test_store_key_shapes() {
        let user_id = Uuid::new_v4();

        assert_eq!(
            token_key(user_id, TokenKind::Access, "abc"),
            format!("{}:access:abc", user_id)
        );
        assert_eq!(
            token_key(user_id, TokenKind::Refresh, "abc"),
            format!("{}:refresh:abc", user_id)
        );
        assert_eq!(
            refresh_to_access_key(user_id, "abc"),
            format!("{}:refresh_to_access:abc", user_id)
        );
    }

    #[test]
    fn test_revocation_prefixes_cover_all_record_kinds() {
        let user_id = Uuid::new_v4();
        let prefixes = revocation_prefixes(user_id);

        assert!(token_key(user_id, TokenKind::Access, "x").starts_with(&prefixes[0]));
        assert!(token_key(user_id, TokenKind::Refresh, "x").starts_with(&prefixes[1]));
        assert!(refresh_to_access_key(user_id, "x").starts_with(&prefixes[2]));
    }

    #[test]
    fn test_claims_serialization_round_trip() {
        let claims = Claims::new_refresh(sample_user(), "jti-4", Duration::days(7));

        let json = serde_json::to_string(&claims).unwrap();
        let deserialized: Claims = serde_json::from_str(&json).unwrap();

        assert_eq!(claims, deserialized);
    }

    #[test]
    fn test_token_pair_serialization() {
        let pair = TokenPair::new("a".to_string(), "r".to_string(), 600, 604800);

        let json = serde_json::to_string(&pair).unwrap();
        let deserialized: TokenPair = serde_json::from_str(&json).unwrap();

        assert_eq!(pair, deserialized);
        assert_eq!(pair.access_expires_in, 600);
    }
}
