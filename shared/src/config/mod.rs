//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT, email-link tokens, cooldowns and OAuth providers
//! - `cache` - Redis connection and timeouts
//! - `database` - Database connection and pool configuration
//! - `external` - Reddit and AI completion API credentials
//! - `mail` - Outbound email relay
//! - `server` - HTTP server binding and public URLs

pub mod auth;
pub mod cache;
pub mod database;
pub mod external;
pub mod mail;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, GoogleOauthConfig, JwtConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use external::{AiConfig, RedditConfig};
pub use mail::MailConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Redis cache configuration
    pub cache: CacheConfig,

    /// Outbound email configuration
    pub mail: MailConfig,

    /// Reddit API configuration
    pub reddit: RedditConfig,

    /// AI completion API configuration
    pub ai: AiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cache: CacheConfig::default(),
            mail: MailConfig::default(),
            reddit: RedditConfig::default(),
            ai: AiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the complete configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            mail: MailConfig::from_env(),
            reddit: RedditConfig::from_env(),
            ai: AiConfig::from_env(),
        }
    }
}
