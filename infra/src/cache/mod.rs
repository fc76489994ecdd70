//! Token store backed by Redis
//!
//! `RedisClient` wraps the raw connection with retry logic and the
//! operations the system needs; `RedisTokenStore` adapts it to the core
//! `TokenStore` trait with bounded per-call timeouts.

pub mod redis_client;
pub mod token_store;

pub use redis_client::RedisClient;
pub use token_store::RedisTokenStore;

// Re-export commonly used types
pub use srm_shared::config::CacheConfig;
