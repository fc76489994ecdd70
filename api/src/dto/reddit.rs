//! Post advisor request/response DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use srm_core::services::reddit::SubredditInfo;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuggestSubredditsRequest {
    /// The post draft to find subreddits for
    #[validate(length(min = 1, max = 40000))]
    pub post: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FormatPostRequest {
    /// The post draft to reformat
    #[validate(length(min = 1, max = 40000))]
    pub post: String,

    /// Target subreddit name without the `r/` prefix
    #[validate(length(min = 1, max = 100))]
    pub subreddit_name: String,

    /// Rules text the draft must satisfy
    #[validate(length(max = 40000))]
    pub subreddit_rules: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<SubredditInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedPostResponse {
    pub formatted_post: String,
}
