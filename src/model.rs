//! Canonical record model shared by the import pipeline
//!
//! A CSV line becomes a [`RawFields`] in the field mapper, then a
//! [`NormalizedRecord`] in the normalizer. Neither outlives the row that
//! produced it.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::dialect::SourceDialect;

/// Closed category taxonomy assigned to every normalized record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Streaming,
    Development,
    Marketplace,
    PaymentProcessor,
    Social,
    Email,
    Gaming,
    CloudStorage,
    Other,
}

impl Category {
    /// All categories, in declaration order
    pub const ALL: [Category; 9] = [
        Category::Streaming,
        Category::Development,
        Category::Marketplace,
        Category::PaymentProcessor,
        Category::Social,
        Category::Email,
        Category::Gaming,
        Category::CloudStorage,
        Category::Other,
    ];

    /// Storage label (snake_case)
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Streaming => "streaming",
            Category::Development => "development",
            Category::Marketplace => "marketplace",
            Category::PaymentProcessor => "payment_processor",
            Category::Social => "social",
            Category::Email => "email",
            Category::Gaming => "gaming",
            Category::CloudStorage => "cloud_storage",
            Category::Other => "other",
        }
    }

    /// Parse a storage label. Unknown labels map to `Other`.
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == label)
            .unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical fields pulled out of one CSV row by the field mapper
///
/// The password is kept only long enough for the normalizer to record its
/// presence; it is wiped on drop and never printed.
pub struct RawFields {
    /// Resolved URL (never empty)
    pub url: String,
    /// Username or email as exported
    pub username: String,
    /// Secret value as exported
    pub password: Zeroizing<String>,
    /// Entry title / display name
    pub name: String,
}

impl fmt::Debug for RawFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawFields")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

/// Account identity. At most one of the two fields is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Plain username
    pub username: Option<String>,
    /// Email-shaped identifier
    pub email: Option<String>,
}

impl Identity {
    /// Identity with a plain username
    pub fn username(value: &str) -> Self {
        Self {
            username: Some(value.to_string()),
            email: None,
        }
    }

    /// Identity with an email address
    pub fn email(value: &str) -> Self {
        Self {
            username: None,
            email: Some(value.to_string()),
        }
    }

    /// Check whether neither field was captured
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

/// Fully normalized record flowing into reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Lowercase hostname without leading `www.` (never empty)
    pub domain: String,
    /// Original URL, or `https://` + original when no scheme was present
    pub url: String,
    /// Username or email
    pub identity: Identity,
    /// True if the source row carried a non-empty password
    pub has_secret: bool,
    /// Inferred category
    pub category: Category,
    /// Dialect that produced the row
    pub source: SourceDialect,
}

/// Why a row was skipped rather than imported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No URL column value could be resolved
    MissingUrl,
    /// The URL did not yield a usable domain
    EmptyDomain,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingUrl => write!(f, "missing url"),
            SkipReason::EmptyDomain => write!(f, "empty domain"),
        }
    }
}
