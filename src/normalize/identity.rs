//! Username / email classification

use std::sync::LazyLock;

use regex::Regex;

use crate::model::Identity;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Check whether an identifier is email-shaped
pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Split a raw login identifier into username or email
///
/// Email-shaped values go to `email`, anything else non-empty to
/// `username`. An empty value yields an empty identity.
pub fn classify_identity(raw: &str) -> Identity {
    let raw = raw.trim();
    if raw.is_empty() {
        Identity::default()
    } else if is_email(raw) {
        Identity::email(raw)
    } else {
        Identity::username(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_email() {
        assert!(is_email("a@b.com"));
        assert!(is_email("first.last+tag@sub.example.co.uk"));
        assert!(!is_email("alice"));
        assert!(!is_email("alice@localhost"));
        assert!(!is_email("a b@c.com"));
        assert!(!is_email("a@@b.com"));
    }

    #[test]
    fn test_classify_username() {
        let identity = classify_identity("alice");
        assert_eq!(identity.username.as_deref(), Some("alice"));
        assert!(identity.email.is_none());
    }

    #[test]
    fn test_classify_email() {
        let identity = classify_identity("a@b.com");
        assert!(identity.username.is_none());
        assert_eq!(identity.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_classify_empty() {
        assert!(classify_identity("").is_empty());
        assert!(classify_identity("   ").is_empty());
    }
}
