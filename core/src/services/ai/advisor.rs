//! Post advisor orchestrating the completion client and the Reddit gateway.

use std::sync::Arc;

use crate::errors::DomainError;
use crate::services::reddit::{RedditGateway, SubredditInfo};

use super::prompts;
use super::CompletionClient;

/// Suggests target subreddits for a post draft and reformats drafts to a
/// subreddit's rules.
pub struct PostAdvisor {
    reddit: Arc<dyn RedditGateway>,
    ai: Arc<dyn CompletionClient>,
}

impl PostAdvisor {
    /// Creates an advisor over the given gateways
    pub fn new(reddit: Arc<dyn RedditGateway>, ai: Arc<dyn CompletionClient>) -> Self {
        Self { reddit, ai }
    }

    /// Suggests subreddits for a post draft, enriched with subscriber
    /// counts and rules.
    ///
    /// Suggested names the Reddit API cannot resolve are skipped rather
    /// than failing the whole request.
    pub async fn suggest_subreddits(&self, post: &str) -> Result<Vec<SubredditInfo>, DomainError> {
        let prompt = prompts::subreddit_suggestion_prompt(post);
        let completion = self.ai.complete(&prompt).await?;
        let names = parse_subreddit_names(&completion);

        let mut suggestions = Vec::with_capacity(names.len());
        for name in names {
            match self.reddit.subreddit_info(&name).await {
                Ok(info) => suggestions.push(info),
                Err(error) => {
                    tracing::warn!(subreddit = %name, %error, "skipping unresolvable suggestion");
                }
            }
        }

        Ok(suggestions)
    }

    /// Rewrites a post draft to satisfy a subreddit's rules
    pub async fn format_post(
        &self,
        post: &str,
        subreddit_name: &str,
        subreddit_rules: &str,
    ) -> Result<String, DomainError> {
        let prompt = prompts::format_post_prompt(post, subreddit_name, subreddit_rules);
        self.ai.complete(&prompt).await
    }
}

/// Extracts subreddit names from a completion.
///
/// The prompt asks for a JSON array; models occasionally answer with a
/// plain list anyway, so line-based parsing is kept as a fallback.
fn parse_subreddit_names(completion: &str) -> Vec<String> {
    let trimmed = completion.trim();

    let raw_names: Vec<String> = match serde_json::from_str::<Vec<String>>(trimmed) {
        Ok(names) => names,
        Err(_) => trimmed
            .lines()
            .map(|line| {
                line.trim()
                    .trim_start_matches(|c: char| c == '-' || c == '*' || c.is_ascii_digit())
                    .trim_start_matches('.')
                    .trim()
                    .trim_matches('"')
                    .trim_matches(',')
                    .to_string()
            })
            .collect(),
    };

    let mut names = Vec::new();
    for raw in raw_names {
        let name = raw
            .trim()
            .trim_start_matches("r/")
            .trim_matches('"')
            .to_string();
        if name.is_empty() || name.contains(char::is_whitespace) {
            continue;
        }
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names.truncate(5);
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;

    use crate::errors::DomainError;
    use crate::services::reddit::{RedditGateway, SubredditInfo, SubredditRule};

    struct StubReddit;

    #[async_trait]
    impl RedditGateway for StubReddit {
        async fn subreddit_info(&self, name: &str) -> Result<SubredditInfo, DomainError> {
            if name == "missing" {
                return Err(DomainError::External {
                    service: "reddit".to_string(),
                    message: "404".to_string(),
                });
            }
            Ok(SubredditInfo {
                name: name.to_string(),
                subscribers: 1000,
                rules: vec![SubredditRule {
                    short_name: "Be kind".to_string(),
                    description: "No abuse".to_string(),
                }],
            })
        }
    }

    struct StubCompletion {
        response: String,
    }

    #[async_trait]
    impl CompletionClient for StubCompletion {
        async fn complete(&self, _prompt: &str) -> Result<String, DomainError> {
            Ok(self.response.clone())
        }
    }

    fn advisor(response: &str) -> PostAdvisor {
        PostAdvisor::new(
            Arc::new(StubReddit),
            Arc::new(StubCompletion {
                response: response.to_string(),
            }),
        )
    }

    #[test]
    fn test_parse_json_array() {
        let names = parse_subreddit_names(r#"["rust", "webdev", "rust"]"#);
        assert_eq!(names, vec!["rust", "webdev"]);
    }

    #[test]
    fn test_parse_plain_lines_with_prefixes() {
        let names = parse_subreddit_names("- r/rust\n2. webdev\n\nnot a name\n");
        assert_eq!(names, vec!["rust", "webdev"]);
    }

    #[test]
    fn test_parse_caps_at_five() {
        let names = parse_subreddit_names(r#"["a","b","c","d","e","f","g"]"#);
        assert_eq!(names.len(), 5);
    }

    #[tokio::test]
    async fn test_suggest_subreddits_enriches_names() {
        let advisor = advisor(r#"["rust", "webdev"]"#);

        let suggestions = advisor.suggest_subreddits("my post").await.unwrap();

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].name, "rust");
        assert_eq!(suggestions[0].subscribers, 1000);
        assert_eq!(suggestions[0].rules.len(), 1);
    }

    #[tokio::test]
    async fn test_suggest_subreddits_skips_unresolvable() {
        let advisor = advisor(r#"["rust", "missing"]"#);

        let suggestions = advisor.suggest_subreddits("my post").await.unwrap();

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].name, "rust");
    }

    #[tokio::test]
    async fn test_format_post_returns_completion() {
        let advisor = advisor("Title: fixed\n\nbody");

        let formatted = advisor
            .format_post("draft", "rust", "1. Be kind")
            .await
            .unwrap();

        assert_eq!(formatted, "Title: fixed\n\nbody");
    }
}
