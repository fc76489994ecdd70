//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Signing and verification of the claims payload (codec)
//! - Issuance of paired access/refresh tokens backed by the token store
//! - Revocation of single sessions and of every session of a user
//! - One-shot hand-off records for OAuth token delivery

mod codec;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use service::TokenService;
