//! Input validation helpers

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email regex must compile")
});

/// Check whether a string looks like a valid email address
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Validate a front-end redirect URI against the configured origins.
///
/// The URI must start with one of the allowed origins; anything else is
/// rejected so email links and OAuth hand-offs can never point at an
/// attacker-controlled page.
pub fn is_allowed_redirect_uri(uri: &str, allowed_origins: &[String]) -> bool {
    if uri.is_empty() {
        return false;
    }
    allowed_origins.iter().any(|origin| uri.starts_with(origin.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.domain.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@example"));
    }

    #[test]
    fn test_redirect_uri_validation() {
        let origins = vec!["https://app.subrmatch.com".to_string()];

        assert!(is_allowed_redirect_uri(
            "https://app.subrmatch.com/verify/",
            &origins
        ));
        assert!(!is_allowed_redirect_uri("https://evil.example/verify/", &origins));
        assert!(!is_allowed_redirect_uri("", &origins));
    }
}
