//! Configuration for the token service

use jsonwebtoken::Algorithm;

use srm_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            access_token_expiry_minutes: crate::domain::entities::token::ACCESS_TOKEN_EXPIRY_MINUTES,
            refresh_token_expiry_days: crate::domain::entities::token::REFRESH_TOKEN_EXPIRY_DAYS,
        }
    }
}

impl TokenServiceConfig {
    /// Access token time-to-live in seconds
    pub fn access_ttl_seconds(&self) -> u64 {
        (self.access_token_expiry_minutes * 60).max(0) as u64
    }

    /// Refresh token time-to-live in seconds
    pub fn refresh_ttl_seconds(&self) -> u64 {
        (self.refresh_token_expiry_days * 24 * 60 * 60).max(0) as u64
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        let algorithm = config
            .algorithm
            .parse::<Algorithm>()
            .unwrap_or(Algorithm::HS256);

        Self {
            jwt_secret: config.secret.clone(),
            algorithm,
            access_token_expiry_minutes: config.access_token_expiry_minutes,
            refresh_token_expiry_days: config.refresh_token_expiry_days,
        }
    }
}
