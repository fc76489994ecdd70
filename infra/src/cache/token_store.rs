//! Redis-backed implementation of the core `TokenStore` trait.

use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

use srm_core::errors::{DomainError, TokenError};
use srm_core::repositories::TokenStore;

use super::redis_client::RedisClient;

/// Token store over Redis with a bounded timeout on every call.
///
/// A timed-out or failed store call surfaces as `StoreUnavailable`: guard
/// checks then fail closed and issuance fails loud, never returning a
/// partially persisted pair.
pub struct RedisTokenStore {
    client: RedisClient,
    timeout: Duration,
}

impl RedisTokenStore {
    /// Creates a store over an existing client
    ///
    /// # Arguments
    /// * `client` - Shared Redis client
    /// * `timeout` - Upper bound for any single store operation
    pub fn new(client: RedisClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl std::future::Future<Output = Result<T, crate::InfrastructureError>>,
    ) -> Result<T, DomainError> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => {
                warn!(%error, operation, "token store operation failed");
                Err(DomainError::Token(TokenError::StoreUnavailable))
            }
            Err(_) => {
                warn!(operation, timeout_ms = self.timeout.as_millis() as u64, "token store operation timed out");
                Err(DomainError::Token(TokenError::StoreUnavailable))
            }
        }
    }
}

#[async_trait]
impl TokenStore for RedisTokenStore {
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), DomainError> {
        self.bounded("set_with_expiry", self.client.set_with_expiry(key, value, ttl_seconds))
            .await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.bounded("get", self.client.get(key)).await
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        self.bounded("delete", self.client.delete(key)).await
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        self.bounded("exists", self.client.exists(key)).await
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, DomainError> {
        self.bounded("keys_with_prefix", self.client.scan_keys(prefix))
            .await
    }
}
