//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and uses Result types for error handling.
//! Implementations handle the actual database operations while keeping the
//! abstraction boundary between domain and infrastructure layers.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use srm_core::repositories::UserRepository;
/// use srm_core::domain::entities::user::User;
/// use srm_core::errors::DomainError;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their email address
    ///
    /// # Arguments
    /// * `email` - The email address to search for
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by their linked Google identity
    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The saved user
    /// * `Err(DomainError)` - Save failed (e.g. duplicate email)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update the verification flag of a user
    async fn update_verified(&self, id: Uuid, is_verified: bool) -> Result<(), DomainError>;

    /// Replace the password hash of a user
    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), DomainError>;

    /// Attach a Google identity to an existing user
    async fn update_google_id(&self, id: Uuid, google_id: &str) -> Result<(), DomainError>;

    /// Check whether an account exists for the given email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
