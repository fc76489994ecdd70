//! External service configuration (Reddit and AI completion APIs)

use serde::{Deserialize, Serialize};

/// Reddit API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedditConfig {
    /// OAuth client ID for the script application
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// User agent sent with every request (Reddit requires a descriptive one)
    pub user_agent: String,

    /// Authenticated API base URL
    pub base_url: String,

    /// Access token endpoint
    pub auth_url: String,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            user_agent: String::from("subrmatch/0.1 by subrmatch"),
            base_url: String::from("https://oauth.reddit.com"),
            auth_url: String::from("https://www.reddit.com/api/v1/access_token"),
        }
    }
}

impl RedditConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            client_id: std::env::var("REDDIT_CLIENT_ID").unwrap_or_default(),
            client_secret: std::env::var("REDDIT_CLIENT_SECRET").unwrap_or_default(),
            user_agent: std::env::var("REDDIT_USER_AGENT")
                .unwrap_or_else(|_| "subrmatch/0.1 by subrmatch".to_string()),
            base_url: std::env::var("REDDIT_BASE_URL")
                .unwrap_or_else(|_| "https://oauth.reddit.com".to_string()),
            auth_url: std::env::var("REDDIT_AUTH_URL")
                .unwrap_or_else(|_| "https://www.reddit.com/api/v1/access_token".to_string()),
        }
    }
}

/// AI completion API configuration (OpenAI-compatible endpoint)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AiConfig {
    /// API key for the completion endpoint
    pub api_key: String,

    /// Base URL of the OpenAI-compatible API
    pub api_url: String,

    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens per completion
    pub max_tokens: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: String::from("https://api.deepseek.com"),
            model: String::from("deepseek-chat"),
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

impl AiConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("AI_API_KEY").unwrap_or_default(),
            api_url: std::env::var("AI_API_URL")
                .unwrap_or_else(|_| "https://api.deepseek.com".to_string()),
            model: std::env::var("AI_MODEL").unwrap_or_else(|_| "deepseek-chat".to_string()),
            temperature: std::env::var("AI_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.7),
            max_tokens: std::env::var("AI_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024),
        }
    }
}
