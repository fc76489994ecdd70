//! User entity representing a registered account in the SubRMatch system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role held by a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A regular registered user
    User,
    /// An administrator
    Admin,
}

impl UserRole {
    /// String form as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    /// Parse a role from its stored string form, defaulting to `User`
    /// for unknown values.
    pub fn from_str_or_default(value: &str) -> Self {
        match value {
            "admin" => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address (unique)
    pub email: String,

    /// Role held by this account
    pub role: UserRole,

    /// Whether the email address has been verified
    pub is_verified: bool,

    /// Bcrypt hash of the password; absent for OAuth-only accounts
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    /// External identity from Google OAuth, if linked
    pub google_id: Option<String>,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified account with a password hash
    pub fn new_with_password(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            role: UserRole::User,
            is_verified: false,
            password_hash: Some(password_hash),
            google_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a new account from an external identity.
    ///
    /// OAuth providers only hand over verified addresses, so the account
    /// starts out verified and carries no password hash.
    pub fn new_oauth(
        name: impl Into<String>,
        email: impl Into<String>,
        google_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            role: UserRole::User,
            is_verified: true,
            password_hash: None,
            google_id: Some(google_id.into()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the account as verified
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }

    /// Checks if this is an OAuth-only account (no password login)
    pub fn is_oauth_only(&self) -> bool {
        self.google_id.is_some() && self.password_hash.is_none()
    }

    /// Checks if the user is an administrator
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Projection of the account safe to embed in token claims and
    /// responses: everything except credentials.
    pub fn safe(&self) -> SafeUser {
        SafeUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            is_verified: self.is_verified,
            created_at: self.created_at,
        }
    }
}

/// Credential-free projection of a user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeUser {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Role held by this account
    pub role: UserRole,

    /// Whether the email address has been verified
    pub is_verified: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}
