//! Main token service implementation

use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::{
    refresh_to_access_key, revocation_prefixes, token_key, Claims, TokenKind, TokenPair,
};
use crate::domain::entities::user::SafeUser;
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenStore;

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;

/// Time-to-live for staged OAuth hand-off records (seconds)
const HANDOFF_TTL_SECONDS: u64 = 300;

/// Service for minting, checking and revoking paired bearer tokens.
///
/// Every pair consists of an access token and a refresh token with
/// independent jtis; a `refresh_to_access` mapping record links them so a
/// refresh operation can revoke its paired access token without decoding it.
pub struct TokenService<S: TokenStore> {
    store: Arc<S>,
    codec: TokenCodec,
    config: TokenServiceConfig,
}

impl<S: TokenStore> TokenService<S> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `store` - Key/value store holding the token records
    /// * `config` - Token service configuration
    pub fn new(store: Arc<S>, config: TokenServiceConfig) -> Self {
        let codec = TokenCodec::new(&config);
        Self {
            store,
            codec,
            config,
        }
    }

    /// Decodes a bearer string into claims, normalizing every failure to
    /// `InvalidToken`
    pub fn decode(&self, token: &str) -> Result<Claims, DomainError> {
        self.codec.decode(token)
    }

    /// Mints a new access/refresh pair for an already-resolved user and
    /// persists the three records backing it.
    ///
    /// # Arguments
    ///
    /// * `user` - Credential-free projection of the resolved user
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Both signed tokens plus expiry metadata
    /// * `Err(DomainError)` - Signing or store write failed; no partially
    ///   issued pair is ever returned
    pub async fn mint_pair(&self, user: &SafeUser) -> Result<TokenPair, DomainError> {
        let access_jti = Uuid::new_v4().to_string();
        let refresh_jti = Uuid::new_v4().to_string();

        let access_claims = Claims::new_access(
            user.clone(),
            &access_jti,
            Duration::minutes(self.config.access_token_expiry_minutes),
        );
        let refresh_claims = Claims::new_refresh(
            user.clone(),
            &refresh_jti,
            Duration::days(self.config.refresh_token_expiry_days),
        );

        let access_token = self.codec.encode(&access_claims)?;
        let refresh_token = self.codec.encode(&refresh_claims)?;

        let access_ttl = self.config.access_ttl_seconds();
        let refresh_ttl = self.config.refresh_ttl_seconds();

        self.store
            .set_with_expiry(
                &token_key(user.id, TokenKind::Access, &access_jti),
                &access_token,
                access_ttl,
            )
            .await?;
        self.store
            .set_with_expiry(
                &token_key(user.id, TokenKind::Refresh, &refresh_jti),
                &refresh_token,
                refresh_ttl,
            )
            .await?;
        // Mapping lives exactly as long as the refresh token it belongs to.
        self.store
            .set_with_expiry(
                &refresh_to_access_key(user.id, &refresh_jti),
                &access_jti,
                refresh_ttl,
            )
            .await?;

        tracing::debug!(user_id = %user.id, "issued token pair");

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            access_ttl as i64,
            refresh_ttl as i64,
        ))
    }

    /// Checks that the store still holds the record backing a token.
    ///
    /// Absence means revoked or never issued; the two are deliberately
    /// indistinguishable.
    pub async fn is_recorded(
        &self,
        user_id: Uuid,
        kind: TokenKind,
        jti: &str,
    ) -> Result<bool, DomainError> {
        self.store.exists(&token_key(user_id, kind, jti)).await
    }

    /// Looks up the access jti paired with a refresh token via the mapping
    /// record
    pub async fn paired_access_jti(
        &self,
        user_id: Uuid,
        refresh_jti: &str,
    ) -> Result<Option<String>, DomainError> {
        self.store
            .get(&refresh_to_access_key(user_id, refresh_jti))
            .await
    }

    /// Point-deletes the three records of a specific pair
    ///
    /// # Arguments
    ///
    /// * `user_id` - Owner of the pair
    /// * `access_jti` - jti of the access token
    /// * `refresh_jti` - jti of the refresh token
    pub async fn revoke_pair(
        &self,
        user_id: Uuid,
        access_jti: &str,
        refresh_jti: &str,
    ) -> Result<(), DomainError> {
        self.store
            .delete(&token_key(user_id, TokenKind::Access, access_jti))
            .await?;
        self.store
            .delete(&token_key(user_id, TokenKind::Refresh, refresh_jti))
            .await?;
        self.store
            .delete(&refresh_to_access_key(user_id, refresh_jti))
            .await?;

        tracing::debug!(user_id = %user_id, "revoked token pair");
        Ok(())
    }

    /// Revokes the session identified by a refresh jti, resolving the
    /// paired access token through the mapping record.
    ///
    /// Used on logout and on refresh rotation. Tolerates a missing mapping
    /// (the access token then just runs out via TTL).
    pub async fn revoke_session(
        &self,
        user_id: Uuid,
        refresh_jti: &str,
    ) -> Result<(), DomainError> {
        if let Some(access_jti) = self.paired_access_jti(user_id, refresh_jti).await? {
            self.store
                .delete(&token_key(user_id, TokenKind::Access, &access_jti))
                .await?;
        }
        self.store
            .delete(&token_key(user_id, TokenKind::Refresh, refresh_jti))
            .await?;
        self.store
            .delete(&refresh_to_access_key(user_id, refresh_jti))
            .await?;

        tracing::debug!(user_id = %user_id, "revoked session");
        Ok(())
    }

    /// Revokes every token record of a user by prefix scan.
    ///
    /// Best-effort: a pair minted concurrently with the scan may survive;
    /// re-invoking converges.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of records deleted
    pub async fn revoke_all(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut deleted = 0;
        for prefix in revocation_prefixes(user_id) {
            deleted += self.store.delete_prefix(&prefix).await?;
        }

        tracing::info!(user_id = %user_id, deleted, "revoked all sessions");
        Ok(deleted)
    }

    /// Stages a freshly issued pair under a one-shot hand-off state key
    /// (`tokens:{state}`), consumed by the front-end after an OAuth redirect
    pub async fn stage_handoff(&self, state: &str, pair: &TokenPair) -> Result<(), DomainError> {
        let value = serde_json::to_string(pair).map_err(|e| DomainError::Internal {
            message: format!("Failed to serialize token pair: {}", e),
        })?;
        self.store
            .set_with_expiry(&format!("tokens:{}", state), &value, HANDOFF_TTL_SECONDS)
            .await
    }

    /// Takes a staged pair, deleting it so the state cannot be replayed
    pub async fn take_handoff(&self, state: &str) -> Result<Option<TokenPair>, DomainError> {
        let key = format!("tokens:{}", state);
        let Some(value) = self.store.get(&key).await? else {
            return Ok(None);
        };
        self.store.delete(&key).await?;

        let pair = serde_json::from_str(&value).map_err(|_| {
            DomainError::Token(TokenError::InvalidToken)
        })?;
        Ok(Some(pair))
    }

    /// Stages the front-end redirect URI for an in-flight OAuth login under
    /// `oauth_state:{state}`
    pub async fn stage_oauth_state(
        &self,
        state: &str,
        redirect_uri: &str,
    ) -> Result<(), DomainError> {
        self.store
            .set_with_expiry(
                &format!("oauth_state:{}", state),
                redirect_uri,
                HANDOFF_TTL_SECONDS,
            )
            .await
    }

    /// Takes a staged OAuth redirect URI, deleting it on read
    pub async fn take_oauth_state(&self, state: &str) -> Result<Option<String>, DomainError> {
        let key = format!("oauth_state:{}", state);
        let Some(value) = self.store.get(&key).await? else {
            return Ok(None);
        };
        self.store.delete(&key).await?;
        Ok(Some(value))
    }
}
