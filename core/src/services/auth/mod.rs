//! Authentication services
//!
//! This module contains the authentication facade and its satellites:
//! - `service` - account flows, pair issuance and the guard chain
//! - `policy` - post-authentication role gate
//! - `link_token` - signed tokens for email verification / reset links
//! - `cooldown` - per-email throttling of outbound mails
//! - `oauth` - external identity provider port

mod cooldown;
mod link_token;
mod oauth;
mod policy;
mod service;

#[cfg(test)]
mod tests;

pub use cooldown::{CooldownPurpose, CooldownService};
pub use link_token::{LinkPurpose, LinkTokenCodec};
pub use oauth::{OauthProfile, OauthProvider};
pub use policy::RoleGate;
pub use service::{AuthService, AuthenticatedUser};
