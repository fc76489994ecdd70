//! Unit tests for the role policy gate

use crate::domain::entities::user::{User, UserRole};
use crate::errors::{AuthError, DomainError};
use crate::services::auth::RoleGate;

fn verified_user(role: UserRole) -> User {
    let mut user = User::new_with_password("alice", "alice@example.com", "hash".to_string());
    user.role = role;
    user.verify();
    user
}

#[test]
fn test_allowed_role_passes() {
    let gate = RoleGate::new(vec![UserRole::User, UserRole::Admin]);
    assert!(gate.authorize(&verified_user(UserRole::User)).is_ok());
    assert!(gate.authorize(&verified_user(UserRole::Admin)).is_ok());
}

#[test]
fn test_disallowed_role_fails() {
    let gate = RoleGate::new(vec![UserRole::Admin]);
    let result = gate.authorize(&verified_user(UserRole::User));

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InsufficientPermission))
    ));
}

#[test]
fn test_unverified_user_fails_even_with_matching_role() {
    let gate = RoleGate::new(vec![UserRole::User]);
    let user = User::new_with_password("bob", "bob@example.com", "hash".to_string());

    let result = gate.authorize(&user);
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountNotVerified))
    ));
}

#[test]
fn test_verification_is_checked_before_role() {
    // An unverified admin must get the verification error, not the
    // permission error
    let gate = RoleGate::new(vec![UserRole::User]);
    let mut admin = User::new_with_password("root", "root@example.com", "hash".to_string());
    admin.role = UserRole::Admin;

    let result = gate.authorize(&admin);
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountNotVerified))
    ));
}
