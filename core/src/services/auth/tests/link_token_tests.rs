//! Unit tests for the email link token codec

use crate::errors::{DomainError, TokenError};
use crate::services::auth::{LinkPurpose, LinkTokenCodec};

#[test]
fn test_round_trip() {
    let codec = LinkTokenCodec::new("secret", 24);

    let token = codec
        .encode("alice@example.com", LinkPurpose::VerifyEmail)
        .unwrap();
    let email = codec.decode(&token, LinkPurpose::VerifyEmail).unwrap();

    assert_eq!(email, "alice@example.com");
}

#[test]
fn test_purpose_mismatch_is_rejected() {
    let codec = LinkTokenCodec::new("secret", 24);

    let token = codec
        .encode("alice@example.com", LinkPurpose::VerifyEmail)
        .unwrap();
    let result = codec.decode(&token, LinkPurpose::ResetPassword);

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidLinkToken))
    ));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let codec = LinkTokenCodec::new("secret", 24);
    let other = LinkTokenCodec::new("another-secret", 24);

    let token = other
        .encode("alice@example.com", LinkPurpose::VerifyEmail)
        .unwrap();
    let result = codec.decode(&token, LinkPurpose::VerifyEmail);

    assert!(result.is_err());
}

#[test]
fn test_expired_link_is_rejected() {
    let codec = LinkTokenCodec::new("secret", -1);

    let token = codec
        .encode("alice@example.com", LinkPurpose::ResetPassword)
        .unwrap();
    let result = codec.decode(&token, LinkPurpose::ResetPassword);

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidLinkToken))
    ));
}

#[test]
fn test_garbage_is_rejected() {
    let codec = LinkTokenCodec::new("secret", 24);
    assert!(codec.decode("garbage", LinkPurpose::VerifyEmail).is_err());
}
