//! Data models for stored accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Category;
use crate::PROVENANCE_SEPARATOR;

/// Account persisted in the repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAccount {
    /// Unique account ID (32 chars)
    pub id: String,
    /// Canonical domain
    pub domain: String,
    /// Last imported URL
    pub url: String,
    /// Plain username, if captured
    pub username: Option<String>,
    /// Email identifier, if captured
    pub email: Option<String>,
    /// True if the last import carried a password
    pub password_stored: bool,
    /// Strength label. Never computed from the secret itself.
    pub password_strength: String,
    /// Inferred category
    pub category: Category,
    /// Comma-joined provenance list (e.g. "firefox,chrome")
    pub source: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl StoredAccount {
    /// Provenance entries in insertion order
    pub fn sources(&self) -> Vec<&str> {
        self.source
            .split(PROVENANCE_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Changes applied to an existing account on re-sighting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPatch {
    /// New URL
    pub url: String,
    /// New password presence flag
    pub password_stored: bool,
    /// Merged provenance list
    pub source: String,
}

/// Number of accounts per category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(source: &str) -> StoredAccount {
        StoredAccount {
            id: "abc".to_string(),
            domain: "github.com".to_string(),
            url: "https://github.com".to_string(),
            username: Some("alice".to_string()),
            email: None,
            password_stored: true,
            password_strength: crate::PASSWORD_STRENGTH_UNKNOWN.to_string(),
            category: Category::Development,
            source: source.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_sources() {
        assert_eq!(account("firefox,chrome").sources(), vec!["firefox", "chrome"]);
        assert_eq!(account("firefox").sources(), vec!["firefox"]);
        assert!(account("").sources().is_empty());
        assert_eq!(account(" edge , ,brave").sources(), vec!["edge", "brave"]);
    }

    #[test]
    fn test_account_serialization() {
        let json = serde_json::to_string(&account("chrome")).unwrap();
        assert!(json.contains("\"category\":\"development\""));
        assert!(json.contains("\"email\":null"));

        let parsed: StoredAccount = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.domain, "github.com");
    }
}
