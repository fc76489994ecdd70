//! Reddit gateway port and its data types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A single rule of a subreddit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubredditRule {
    /// Short rule title
    pub short_name: String,
    /// Full rule text
    pub description: String,
}

/// Summary of a subreddit: audience size plus posting rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubredditInfo {
    /// Subreddit name without the `r/` prefix
    pub name: String,
    /// Subscriber count
    pub subscribers: u64,
    /// Posting rules
    pub rules: Vec<SubredditRule>,
}

/// Port for the Reddit data API
#[async_trait]
pub trait RedditGateway: Send + Sync {
    /// Fetch a subreddit's summary including its rules
    ///
    /// # Arguments
    /// * `name` - Subreddit name without the `r/` prefix
    async fn subreddit_info(&self, name: &str) -> Result<SubredditInfo, DomainError>;
}
