//! # Infrastructure Layer
//!
//! Concrete implementations of the core ports: MySQL persistence via SQLx,
//! the Redis-backed token store, and HTTP clients for the mail relay,
//! Reddit, the AI completion API and Google OAuth.

/// AI completion API client
pub mod ai;

/// Token store and raw Redis client
pub mod cache;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Outbound email relay client
pub mod email;

/// Google OAuth provider client
pub mod oauth;

/// Reddit API client
pub mod reddit;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
