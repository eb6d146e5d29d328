//! Domain extraction from exported URLs

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Scheme prefixed to URLs exported without one
const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// A scheme only counts at the very start, so URLs nested in a query
/// string do not suppress the default.
static SCHEME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://").expect("scheme pattern is valid")
});

/// Return the URL with `https://` prefixed when no scheme is present
pub fn with_default_scheme(raw: &str) -> String {
    if SCHEME_PATTERN.is_match(raw) {
        raw.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, raw)
    }
}

/// Strip a single leading `www.`
fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Extract the canonical domain from a URL
///
/// Parses the URL (defaulting the scheme to https) and takes the hostname.
/// A URL that parses without a host (`file:///etc/hosts`) has no domain.
/// Only when parsing fails does it fall back to the part of the raw string
/// before the first `/`. The result is lowercased with a leading `www.`
/// removed and may be empty.
pub fn extract_domain(raw: &str) -> String {
    let host = match Url::parse(&with_default_scheme(raw)) {
        Ok(url) => url.host_str().unwrap_or("").to_string(),
        Err(_) => raw.split('/').next().unwrap_or("").to_string(),
    };

    strip_www(&host.trim().to_lowercase()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_default_scheme() {
        assert_eq!(with_default_scheme("netflix.com"), "https://netflix.com");
        assert_eq!(with_default_scheme("http://a.com/x"), "http://a.com/x");
        assert_eq!(with_default_scheme("android://hash@com.example.app/"), "android://hash@com.example.app/");
    }

    #[test]
    fn test_nested_url_does_not_count_as_scheme() {
        let raw = "example.com/login?next=https://x.io";
        assert_eq!(with_default_scheme(raw), "https://example.com/login?next=https://x.io");
        assert_eq!(extract_domain(raw), "example.com");
        assert_eq!(with_default_scheme("/cb?u=ftp://a.b"), "https:///cb?u=ftp://a.b");
    }

    #[test]
    fn test_hostless_url_yields_empty() {
        assert_eq!(extract_domain("file:///etc/hosts"), "");
    }

    #[test]
    fn test_extract_full_url() {
        assert_eq!(extract_domain("https://github.com"), "github.com");
        assert_eq!(extract_domain("https://www.GitHub.com/login?x=1"), "github.com");
        assert_eq!(extract_domain("http://accounts.google.com:443/signin"), "accounts.google.com");
    }

    #[test]
    fn test_extract_without_scheme() {
        assert_eq!(extract_domain("netflix.com"), "netflix.com");
        assert_eq!(extract_domain("www.netflix.com/browse"), "netflix.com");
    }

    #[test]
    fn test_only_leading_www_stripped() {
        assert_eq!(extract_domain("https://www.www.example.com"), "www.example.com");
        assert_eq!(extract_domain("https://mywww.example.com"), "mywww.example.com");
    }

    #[test]
    fn test_fallback_on_parse_failure() {
        // Space in host makes the URL invalid
        assert_eq!(extract_domain("WWW.bad host.com/path"), "bad host.com");
    }

    #[test]
    fn test_unusable_url_yields_empty() {
        assert_eq!(extract_domain("/"), "");
    }

    #[test]
    fn test_normalization_idempotent() {
        for raw in ["https://www.github.com/a", "netflix.com", "http://Sub.Example.org:8080"] {
            let once = extract_domain(raw);
            assert_eq!(extract_domain(&once), once);
        }
    }
}
