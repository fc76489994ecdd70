//! Prompt builders for the post advisor

const SUGGEST_SUBREDDIT_EXAMPLE: &str = r#"["rust", "learnprogramming", "webdev"]"#;

const FORMAT_POST_EXAMPLE: &str = "Title: <post title>\n\n<post body rewritten to satisfy the rules>";

/// Prompt asking for 3-5 relevant subreddits for a post draft.
///
/// The model is instructed to answer with a bare JSON array of subreddit
/// names so the response stays machine-parseable.
pub fn subreddit_suggestion_prompt(post: &str) -> String {
    let divider = "-".repeat(40);
    format!(
        "You are a Reddit expert. Analyze the following Reddit post and suggest 3-5 relevant subreddits where it could be posted.\n\
         Focus on the topic, tone, and content.\n\
         {divider}\n\
         The post:\n\
         {{{post}}}\n\
         {divider}\n\
         Return the response in such format, do not add anything else:\n\
         {SUGGEST_SUBREDDIT_EXAMPLE}\n"
    )
}

/// Prompt asking to rewrite a post draft to satisfy a subreddit's rules
pub fn format_post_prompt(post: &str, subreddit_name: &str, subreddit_rules: &str) -> String {
    let divider = "-".repeat(40);
    format!(
        "You are a Reddit expert. Analyze the following Reddit post and format it according to the subreddit rules.\n\
         Focus on the topic, tone, and content.\n\
         {divider}\n\
         The post:\n\
         {{{post}}}\n\
         {divider}\n\
         Subreddit name: '{subreddit_name}'\n\
         Subreddit rules:\n\
         {{{subreddit_rules}}}\n\
         Return the response in such format, do not add anything else:\n\
         {{{FORMAT_POST_EXAMPLE}}}\n"
    )
}
