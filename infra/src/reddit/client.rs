//! Reddit API client implementing the core `RedditGateway` port.
//!
//! Authenticates with the client-credentials grant and caches the bearer
//! token until shortly before it expires.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use srm_core::errors::DomainError;
use srm_core::services::reddit::{RedditGateway, SubredditInfo, SubredditRule};
use srm_shared::config::RedditConfig;

/// Safety margin subtracted from the token lifetime before re-authenticating
const TOKEN_REFRESH_MARGIN_SECONDS: i64 = 30;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        self.expires_at - Duration::seconds(TOKEN_REFRESH_MARGIN_SECONDS) > Utc::now()
    }
}

/// Reddit API client with cached client-credentials authentication
pub struct RedditApiClient {
    http: reqwest::Client,
    config: RedditConfig,
    token: RwLock<Option<CachedToken>>,
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct AboutResponse {
    data: AboutData,
}

#[derive(Debug, Deserialize)]
struct AboutData {
    display_name: String,
    subscribers: u64,
}

#[derive(Debug, Deserialize)]
struct RulesResponse {
    rules: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
struct RuleEntry {
    short_name: String,
    description: String,
}

impl RedditApiClient {
    /// Create a new client from configuration
    pub fn new(config: RedditConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            token: RwLock::new(None),
        }
    }

    fn external_error(&self, message: impl Into<String>) -> DomainError {
        DomainError::External {
            service: "reddit".to_string(),
            message: message.into(),
        }
    }

    /// Return a fresh bearer token, re-authenticating when the cached one
    /// is close to expiry
    async fn bearer_token(&self) -> Result<String, DomainError> {
        if let Some(token) = self.token.read().await.as_ref() {
            if token.is_fresh() {
                return Ok(token.access_token.clone());
            }
        }

        debug!("authenticating against the Reddit token endpoint");

        // Basic Auth: base64(client_id:client_secret)
        let credentials = STANDARD.encode(format!(
            "{}:{}",
            self.config.client_id, self.config.client_secret
        ));

        let response = self
            .http
            .post(&self.config.auth_url)
            .header(AUTHORIZATION, format!("Basic {}", credentials))
            .header(USER_AGENT, &self.config.user_agent)
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| self.external_error(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("Reddit authentication failed with status {}", status);
            return Err(self.external_error(format!("authentication failed: {}", status)));
        }

        let token_data: AccessTokenResponse = response
            .json()
            .await
            .map_err(|e| self.external_error(e.to_string()))?;

        let cached = CachedToken {
            access_token: token_data.access_token.clone(),
            expires_at: Utc::now() + Duration::seconds(token_data.expires_in),
        };
        *self.token.write().await = Some(cached);

        Ok(token_data.access_token)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, DomainError> {
        let token = self.bearer_token().await?;
        let url = format!("{}{}", self.config.base_url, path);

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(USER_AGENT, &self.config.user_agent)
            .send()
            .await
            .map_err(|e| self.external_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.external_error(format!("GET {} returned {}", path, response.status())));
        }

        response
            .json()
            .await
            .map_err(|e| self.external_error(e.to_string()))
    }
}

#[async_trait]
impl RedditGateway for RedditApiClient {
    async fn subreddit_info(&self, name: &str) -> Result<SubredditInfo, DomainError> {
        let about: AboutResponse = self.get_json(&format!("/r/{}/about", name)).await?;
        let rules: RulesResponse = self.get_json(&format!("/r/{}/about/rules", name)).await?;

        Ok(SubredditInfo {
            name: about.data.display_name,
            subscribers: about.data.subscribers,
            rules: rules
                .rules
                .into_iter()
                .map(|rule| SubredditRule {
                    short_name: rule.short_name,
                    description: rule.description,
                })
                .collect(),
        })
    }
}
