//! Authentication service: account flows, token issuance and the per-request
//! guard chain.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::domain::entities::user::{SafeUser, User};
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{TokenStore, UserRepository};
use crate::services::token::TokenService;

use super::oauth::OauthProfile;

/// Result of a successful guard-chain run: the validated claims together
/// with the freshly resolved user record.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Claims decoded from the presented bearer token
    pub claims: Claims,
    /// User resolved from the claims' email at verification time
    pub user: User,
}

/// Facade over the user repository and the token service implementing every
/// authentication flow of the system.
pub struct AuthService<U: UserRepository, S: TokenStore> {
    users: Arc<U>,
    tokens: TokenService<S>,
}

impl<U: UserRepository, S: TokenStore> AuthService<U, S> {
    /// Creates a new authentication service
    ///
    /// # Arguments
    ///
    /// * `users` - User repository for identity resolution
    /// * `tokens` - Token service for issuance and revocation
    pub fn new(users: Arc<U>, tokens: TokenService<S>) -> Self {
        Self { users, tokens }
    }

    /// The underlying token service, shared with route handlers that stage
    /// OAuth hand-off records
    pub fn tokens(&self) -> &TokenService<S> {
        &self.tokens
    }

    /// Looks up a user by email
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.users.find_by_email(email).await
    }

    /// Issues a fresh access/refresh pair for the identity embedded in the
    /// caller-supplied claims.
    ///
    /// The user is re-resolved by email first so the pair always carries the
    /// persisted identity and its current role/verification state.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Both signed tokens
    /// * `Err(DomainError)` - `UserNotFound` if the identity no longer
    ///   resolves, or a store/signing failure
    pub async fn issue_pair(&self, user_claims: &SafeUser) -> Result<TokenPair, DomainError> {
        let user = self
            .users
            .find_by_email(&user_claims.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.tokens.mint_pair(&user.safe()).await
    }

    /// Verifies a bearer token of the required kind against codec, user
    /// lookup and store record.
    ///
    /// Steps:
    /// 1. Decode the token (`InvalidToken` on any codec failure)
    /// 2. Check the refresh flag against `required`
    ///    (`AccessTokenRequired` / `RefreshTokenRequired`)
    /// 3. Resolve the user from the claims' email (`UserNotFound`)
    /// 4. Confirm the store still holds `{user.id}:{kind}:{jti}`
    ///    (`InvalidToken` - revoked and never-issued look identical)
    pub async fn authenticate(
        &self,
        bearer: &str,
        required: TokenKind,
    ) -> Result<AuthenticatedUser, DomainError> {
        let claims = self.tokens.decode(bearer)?;

        if claims.kind() != required {
            return Err(match required {
                TokenKind::Access => TokenError::AccessTokenRequired.into(),
                TokenKind::Refresh => TokenError::RefreshTokenRequired.into(),
            });
        }

        let user = self
            .users
            .find_by_email(&claims.user.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.tokens.is_recorded(user.id, required, &claims.jti).await? {
            return Err(TokenError::InvalidToken.into());
        }

        Ok(AuthenticatedUser { claims, user })
    }

    /// Registers a new account with a bcrypt-hashed password.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created, unverified account
    /// * `Err(DomainError)` - `UserAlreadyExists` for duplicate emails
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        if self.users.exists_by_email(email).await? {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash =
            bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            })?;

        let user = self
            .users
            .create(User::new_with_password(name, email, password_hash))
            .await?;

        tracing::info!(user_id = %user.id, "account created");
        Ok(user)
    }

    /// Verifies credentials and issues a pair.
    ///
    /// Unknown email, wrong password and OAuth-only accounts all yield the
    /// same `InvalidCredentials` so responses never reveal which it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let Some(password_hash) = user.password_hash.as_deref() else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let valid = bcrypt::verify(password, password_hash).map_err(|e| DomainError::Internal {
            message: format!("Password verification failed: {}", e),
        })?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        self.tokens.mint_pair(&user.safe()).await
    }

    /// Rotates a validated refresh token: revokes the old pair through the
    /// mapping record, then mints a new one.
    ///
    /// The old refresh token's store record is deleted first, so presenting
    /// it again fails the guard chain.
    pub async fn rotate(&self, user: &User, refresh_jti: &str) -> Result<TokenPair, DomainError> {
        self.tokens.revoke_session(user.id, refresh_jti).await?;
        self.tokens.mint_pair(&user.safe()).await
    }

    /// Logs out the session identified by a validated refresh token
    pub async fn logout(&self, user_id: Uuid, refresh_jti: &str) -> Result<(), DomainError> {
        self.tokens.revoke_session(user_id, refresh_jti).await
    }

    /// Marks the account belonging to `email` as verified
    pub async fn verify_account(&self, email: &str) -> Result<(), DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.users.update_verified(user.id, true).await
    }

    /// Replaces the password of the account belonging to `email` and
    /// revokes every session of the user ("log out everywhere").
    pub async fn reset_password(
        &self,
        email: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let password_hash =
            bcrypt::hash(new_password, bcrypt::DEFAULT_COST).map_err(|e| DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            })?;

        self.users
            .update_password_hash(user.id, &password_hash)
            .await?;

        self.tokens.revoke_all(user.id).await?;
        Ok(())
    }

    /// Signs a user in through an external identity, creating or linking
    /// the account as needed, and issues a pair.
    ///
    /// A password account that is not yet verified cannot be taken over via
    /// OAuth; its owner must verify the email first.
    pub async fn oauth_login(&self, profile: &OauthProfile) -> Result<TokenPair, DomainError> {
        if !profile.email_verified {
            return Err(AuthError::OauthFailed.into());
        }

        let user = match self.users.find_by_email(&profile.email).await? {
            Some(user) if user.password_hash.is_some() => {
                if !user.is_verified {
                    return Err(AuthError::AccountNotVerified.into());
                }
                if user.google_id.is_none() {
                    self.users.update_google_id(user.id, &profile.subject).await?;
                }
                user
            }
            Some(user) => user,
            None => {
                let created = self
                    .users
                    .create(User::new_oauth(
                        profile.name.clone(),
                        profile.email.clone(),
                        profile.subject.clone(),
                    ))
                    .await?;
                tracing::info!(user_id = %created.id, "account created via oauth");
                created
            }
        };

        self.tokens.mint_pair(&user.safe()).await
    }
}
