//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in minutes
    pub access_token_expiry_minutes: i64,

    /// Refresh token expiry time in days
    pub refresh_token_expiry_days: i64,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-please-change-in-production"),
            access_token_expiry_minutes: 10,
            refresh_token_expiry_days: 7,
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_minutes = minutes;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry_days = days;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-please-change-in-production"
    }
}

/// Google OAuth2 provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleOauthConfig {
    /// OAuth2 client ID
    pub client_id: String,

    /// OAuth2 client secret
    pub client_secret: String,

    /// Authorization URL
    #[serde(default = "default_google_auth_url")]
    pub auth_url: String,

    /// Token exchange URL
    #[serde(default = "default_google_token_url")]
    pub token_url: String,

    /// Userinfo endpoint URL
    #[serde(default = "default_google_userinfo_url")]
    pub userinfo_url: String,
}

impl GoogleOauthConfig {
    /// Load the Google OAuth configuration from environment variables,
    /// returning `None` when no client ID is configured.
    pub fn from_env() -> Option<Self> {
        let client_id = std::env::var("GOOGLE_CLIENT_ID").ok()?;
        let client_secret = std::env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default();

        Some(Self {
            client_id,
            client_secret,
            auth_url: default_google_auth_url(),
            token_url: default_google_token_url(),
            userinfo_url: default_google_userinfo_url(),
        })
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Lifetime of signed email-link tokens in hours
    pub link_token_lifetime_hours: i64,

    /// Cooldown between verification / reset emails in seconds
    pub mail_cooldown_seconds: i64,

    /// Google OAuth provider (optional)
    #[serde(default)]
    pub google: Option<GoogleOauthConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            link_token_lifetime_hours: 24,
            mail_cooldown_seconds: 300,
            google: None,
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET_KEY")
            .unwrap_or_else(|_| "development-secret-please-change-in-production".to_string());
        let access_token_expiry_minutes = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);
        let refresh_token_expiry_days = std::env::var("REFRESH_TOKEN_EXPIRE_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7);
        let link_token_lifetime_hours = std::env::var("VERIFICATION_TOKEN_LIFETIME_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);
        let mail_cooldown_seconds = std::env::var("MAIL_VERIFICATION_COOLDOWN")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .unwrap_or(300);

        Self {
            jwt: JwtConfig {
                secret: jwt_secret,
                access_token_expiry_minutes,
                refresh_token_expiry_days,
                algorithm: std::env::var("JWT_ALGORITHM").unwrap_or_else(|_| default_algorithm()),
            },
            link_token_lifetime_hours,
            mail_cooldown_seconds,
            google: GoogleOauthConfig::from_env(),
        }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_google_auth_url() -> String {
    String::from("https://accounts.google.com/o/oauth2/v2/auth")
}

fn default_google_token_url() -> String {
    String::from("https://oauth2.googleapis.com/token")
}

fn default_google_userinfo_url() -> String {
    String::from("https://openidconnect.googleapis.com/v1/userinfo")
}
