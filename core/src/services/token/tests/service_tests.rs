//! Unit tests for the token service

use std::sync::Arc;

use crate::domain::entities::token::{token_key, TokenKind, TokenPair};
use crate::domain::entities::user::{SafeUser, User};
use crate::repositories::{MockTokenStore, TokenStore};
use crate::services::token::{TokenService, TokenServiceConfig};

fn create_test_service() -> (TokenService<MockTokenStore>, Arc<MockTokenStore>) {
    let store = Arc::new(MockTokenStore::new());
    let service = TokenService::new(Arc::clone(&store), TokenServiceConfig::default());
    (service, store)
}

fn sample_user() -> SafeUser {
    User::new_with_password("alice", "alice@example.com", "hash".to_string()).safe()
}

#[tokio::test]
async fn test_mint_pair_writes_three_records() {
    let (service, store) = create_test_service();
    let user = sample_user();

    let pair = service.mint_pair(&user).await.unwrap();

    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());
    assert_eq!(pair.access_expires_in, 10 * 60);
    assert_eq!(pair.refresh_expires_in, 7 * 24 * 60 * 60);
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn test_minted_tokens_carry_independent_jtis() {
    let (service, _) = create_test_service();
    let user = sample_user();

    let pair = service.mint_pair(&user).await.unwrap();
    let access = service.decode(&pair.access_token).unwrap();
    let refresh = service.decode(&pair.refresh_token).unwrap();

    assert_ne!(access.jti, refresh.jti);
    assert!(!access.refresh);
    assert!(refresh.refresh);
    assert_eq!(access.user.email, "alice@example.com");
}

#[tokio::test]
async fn test_mapping_record_points_at_access_jti() {
    let (service, _) = create_test_service();
    let user = sample_user();

    let pair = service.mint_pair(&user).await.unwrap();
    let access = service.decode(&pair.access_token).unwrap();
    let refresh = service.decode(&pair.refresh_token).unwrap();

    let mapped = service
        .paired_access_jti(user.id, &refresh.jti)
        .await
        .unwrap();
    assert_eq!(mapped.as_deref(), Some(access.jti.as_str()));
}

#[tokio::test]
async fn test_is_recorded_after_mint() {
    let (service, _) = create_test_service();
    let user = sample_user();

    let pair = service.mint_pair(&user).await.unwrap();
    let access = service.decode(&pair.access_token).unwrap();
    let refresh = service.decode(&pair.refresh_token).unwrap();

    assert!(service
        .is_recorded(user.id, TokenKind::Access, &access.jti)
        .await
        .unwrap());
    assert!(service
        .is_recorded(user.id, TokenKind::Refresh, &refresh.jti)
        .await
        .unwrap());
    assert!(!service
        .is_recorded(user.id, TokenKind::Access, "never-issued")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_deleted_record_dominates_cryptographic_validity() {
    let (service, store) = create_test_service();
    let user = sample_user();

    let pair = service.mint_pair(&user).await.unwrap();
    let access = service.decode(&pair.access_token).unwrap();

    store
        .delete(&token_key(user.id, TokenKind::Access, &access.jti))
        .await
        .unwrap();

    // The signature still verifies but the record is gone
    assert!(service.decode(&pair.access_token).is_ok());
    assert!(!service
        .is_recorded(user.id, TokenKind::Access, &access.jti)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_revoke_pair_deletes_all_three_records() {
    let (service, store) = create_test_service();
    let user = sample_user();

    let pair = service.mint_pair(&user).await.unwrap();
    let access = service.decode(&pair.access_token).unwrap();
    let refresh = service.decode(&pair.refresh_token).unwrap();

    service
        .revoke_pair(user.id, &access.jti, &refresh.jti)
        .await
        .unwrap();

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_revoke_session_resolves_access_via_mapping() {
    let (service, store) = create_test_service();
    let user = sample_user();

    let pair = service.mint_pair(&user).await.unwrap();
    let refresh = service.decode(&pair.refresh_token).unwrap();

    service.revoke_session(user.id, &refresh.jti).await.unwrap();

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_revoke_session_tolerates_missing_mapping() {
    let (service, _) = create_test_service();
    let user = sample_user();

    // Never issued: nothing to delete, must not error
    service.revoke_session(user.id, "unknown-jti").await.unwrap();
}

#[tokio::test]
async fn test_revoke_all_clears_every_session() {
    let (service, store) = create_test_service();
    let user = sample_user();
    let other = User::new_with_password("bob", "bob@example.com", "hash".to_string()).safe();

    service.mint_pair(&user).await.unwrap();
    service.mint_pair(&user).await.unwrap();
    service.mint_pair(&other).await.unwrap();

    let deleted = service.revoke_all(user.id).await.unwrap();

    assert_eq!(deleted, 6);
    // The other user's pair is untouched
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn test_revoke_all_is_idempotent() {
    let (service, _) = create_test_service();
    let user = sample_user();

    service.mint_pair(&user).await.unwrap();
    assert_eq!(service.revoke_all(user.id).await.unwrap(), 3);
    assert_eq!(service.revoke_all(user.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_handoff_is_one_shot() {
    let (service, _) = create_test_service();
    let pair = TokenPair::new("a".to_string(), "r".to_string(), 600, 604800);

    service.stage_handoff("state-1", &pair).await.unwrap();

    let taken = service.take_handoff("state-1").await.unwrap();
    assert_eq!(taken, Some(pair));

    // Second read must find nothing
    assert!(service.take_handoff("state-1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_oauth_state_round_trip() {
    let (service, _) = create_test_service();

    service
        .stage_oauth_state("s1", "https://app.subrmatch.com/login")
        .await
        .unwrap();

    let uri = service.take_oauth_state("s1").await.unwrap();
    assert_eq!(uri.as_deref(), Some("https://app.subrmatch.com/login"));
    assert!(service.take_oauth_state("s1").await.unwrap().is_none());
}
