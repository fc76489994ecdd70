//! Token store trait defining the interface for token record persistence.
//!
//! The store is a TTL-capable key/value abstraction over Redis. Presence of
//! a record is the authoritative proof that a token has not been revoked: a
//! structurally valid, unexpired token whose record is absent must be
//! rejected by callers.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Key/value store for token records, mapping records and cooldown markers
///
/// # Consistency
/// Individual operations are atomic at the store level. Multi-key sequences
/// built on top of them (pair issuance, prefix revocation) are not
/// transactional; callers must tolerate torn sequences, which converge
/// because every record carries its own TTL.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Store a value under `key` with a time-to-live in seconds
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), DomainError>;

    /// Fetch the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Record present and unexpired
    /// * `Ok(None)` - Record absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Delete the record under `key`
    ///
    /// # Returns
    /// * `Ok(true)` - A record was deleted
    /// * `Ok(false)` - No record existed
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Check whether a record exists under `key`
    async fn exists(&self, key: &str) -> Result<bool, DomainError>;

    /// Enumerate all keys starting with `prefix`
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, DomainError>;

    /// Delete every record whose key starts with `prefix`
    ///
    /// Enumerate-then-delete: a record written between the enumeration and
    /// the deletes may survive. Revocation flows accept this and stay
    /// re-triggerable.
    ///
    /// # Returns
    /// * `Ok(count)` - Number of records deleted
    async fn delete_prefix(&self, prefix: &str) -> Result<usize, DomainError> {
        let keys = self.keys_with_prefix(prefix).await?;
        let mut deleted = 0;
        for key in keys {
            if self.delete(&key).await? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
