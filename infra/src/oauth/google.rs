//! Google implementation of the core `OauthProvider` port.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use srm_core::errors::{AuthError, DomainError};
use srm_core::services::auth::{OauthProfile, OauthProvider};
use srm_shared::config::GoogleOauthConfig;

/// Google OAuth 2.0 authorization-code client
pub struct GoogleOauthProvider {
    http: reqwest::Client,
    config: GoogleOauthConfig,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserinfoResponse {
    sub: String,
    email: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email_verified: bool,
}

impl GoogleOauthProvider {
    /// Create a new provider from configuration
    pub fn new(config: GoogleOauthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl OauthProvider for GoogleOauthProvider {
    fn authorize_url(&self, state: &str, callback_url: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope=openid%20email%20profile&state={}",
            self.config.auth_url,
            urlencode(&self.config.client_id),
            urlencode(callback_url),
            urlencode(state),
        )
    }

    async fn exchange_code(
        &self,
        code: &str,
        callback_url: &str,
    ) -> Result<OauthProfile, DomainError> {
        debug!("exchanging authorization code with Google");

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", callback_url),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!("Google token exchange failed: {}", e);
                DomainError::Auth(AuthError::OauthFailed)
            })?;

        if !response.status().is_success() {
            warn!(
                "Google token exchange returned status {}",
                response.status()
            );
            return Err(AuthError::OauthFailed.into());
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|_| DomainError::Auth(AuthError::OauthFailed))?;

        let userinfo = self
            .http
            .get(&self.config.userinfo_url)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|_| DomainError::Auth(AuthError::OauthFailed))?;

        if !userinfo.status().is_success() {
            return Err(AuthError::OauthFailed.into());
        }

        let info: UserinfoResponse = userinfo
            .json()
            .await
            .map_err(|_| DomainError::Auth(AuthError::OauthFailed))?;

        Ok(OauthProfile {
            subject: info.sub,
            email: info.email,
            name: info.name,
            email_verified: info.email_verified,
        })
    }
}

/// Percent-encode a query component
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlencode() {
        assert_eq!(urlencode("abc-123"), "abc-123");
        assert_eq!(urlencode("http://a/b?c=d"), "http%3A%2F%2Fa%2Fb%3Fc%3Dd");
        assert_eq!(urlencode("a b"), "a%20b");
    }

    #[test]
    fn test_authorize_url_contains_state_and_callback() {
        let provider = GoogleOauthProvider::new(GoogleOauthConfig {
            client_id: "client-1".to_string(),
            client_secret: "secret".to_string(),
            auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            userinfo_url: "https://openidconnect.googleapis.com/v1/userinfo".to_string(),
        });

        let url = provider.authorize_url("state-1", "http://localhost:8000/api/v1/auth/google/callback");

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("state=state-1"));
        assert!(url.contains("client_id=client-1"));
        assert!(url.contains("response_type=code"));
    }
}
