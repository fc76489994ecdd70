//! External identity provider port.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Identity returned by an OAuth provider after a successful code exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OauthProfile {
    /// Stable subject identifier at the provider
    pub subject: String,
    /// Email address on the external account
    pub email: String,
    /// Display name on the external account
    pub name: String,
    /// Whether the provider attests the email as verified
    pub email_verified: bool,
}

/// Port for the authorization-code flow of an external identity provider
#[async_trait]
pub trait OauthProvider: Send + Sync {
    /// Builds the URL the browser is redirected to for consent
    fn authorize_url(&self, state: &str, callback_url: &str) -> String;

    /// Exchanges an authorization code for the user's profile
    async fn exchange_code(
        &self,
        code: &str,
        callback_url: &str,
    ) -> Result<OauthProfile, DomainError>;
}
