//! Role policy gate applied after the guard chain.

use crate::domain::entities::user::{User, UserRole};
use crate::errors::{AuthError, DomainError};

/// Post-authentication authorization check.
///
/// Verification is checked before role, so an unverified admin is rejected
/// with `AccountNotVerified`, never `InsufficientPermission`.
#[derive(Debug, Clone)]
pub struct RoleGate {
    allowed: Vec<UserRole>,
}

impl RoleGate {
    /// Creates a gate admitting the given roles
    pub fn new(allowed: impl Into<Vec<UserRole>>) -> Self {
        Self {
            allowed: allowed.into(),
        }
    }

    /// Authorizes an authenticated user against this gate
    ///
    /// # Returns
    /// * `Ok(())` - User is verified and holds an allowed role
    /// * `Err(DomainError)` - `AccountNotVerified` or `InsufficientPermission`
    pub fn authorize(&self, user: &User) -> Result<(), DomainError> {
        if !user.is_verified {
            return Err(AuthError::AccountNotVerified.into());
        }
        if self.allowed.contains(&user.role) {
            return Ok(());
        }
        Err(AuthError::InsufficientPermission.into())
    }
}
