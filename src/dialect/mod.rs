//! Source dialects and their column-name conventions
//!
//! Each supported export format is one row in [`DIALECT_TABLE`]. Adding a
//! format means adding a variant and a table row; the mapper and detector
//! read everything else from the table.

mod detect;
mod mapper;

pub use detect::detect_dialect;
pub use mapper::map_row;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SyncError;

/// Export format that produced a CSV row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceDialect {
    Chrome,
    Edge,
    Firefox,
    Brave,
    Bitwarden,
    Lastpass,
    Onepassword,
    Dashlane,
    Keepass,
}

/// Header names a dialect uses for each canonical field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMap {
    pub url: &'static str,
    pub username: &'static str,
    pub password: &'static str,
    pub name: &'static str,
}

/// Mapping used when a dialect has no row of its own
pub const DEFAULT_FIELD_MAP: FieldMap = FieldMap {
    url: "url",
    username: "username",
    password: "password",
    name: "name",
};

/// Canonical field -> header name, per dialect
pub const DIALECT_TABLE: &[(SourceDialect, FieldMap)] = &[
    (SourceDialect::Chrome, DEFAULT_FIELD_MAP),
    (SourceDialect::Edge, DEFAULT_FIELD_MAP),
    (SourceDialect::Brave, DEFAULT_FIELD_MAP),
    (SourceDialect::Firefox, FieldMap { url: "url", username: "username", password: "password", name: "url" }),
    (SourceDialect::Bitwarden, FieldMap { url: "login_uri", username: "login_username", password: "login_password", name: "name" }),
    (SourceDialect::Lastpass, DEFAULT_FIELD_MAP),
    (SourceDialect::Onepassword, FieldMap { url: "url", username: "username", password: "password", name: "title" }),
    (SourceDialect::Dashlane, FieldMap { url: "url", username: "username", password: "password", name: "title" }),
    (SourceDialect::Keepass, FieldMap { url: "url", username: "username", password: "password", name: "title" }),
];

impl SourceDialect {
    /// Dialect whose mapping is used for unrecognized names
    pub const DEFAULT: SourceDialect = SourceDialect::Chrome;

    /// All known dialects
    pub const ALL: [SourceDialect; 9] = [
        SourceDialect::Chrome,
        SourceDialect::Edge,
        SourceDialect::Firefox,
        SourceDialect::Brave,
        SourceDialect::Bitwarden,
        SourceDialect::Lastpass,
        SourceDialect::Onepassword,
        SourceDialect::Dashlane,
        SourceDialect::Keepass,
    ];

    /// Provenance tag stored on accounts
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceDialect::Chrome => "chrome",
            SourceDialect::Edge => "edge",
            SourceDialect::Firefox => "firefox",
            SourceDialect::Brave => "brave",
            SourceDialect::Bitwarden => "bitwarden",
            SourceDialect::Lastpass => "lastpass",
            SourceDialect::Onepassword => "onepassword",
            SourceDialect::Dashlane => "dashlane",
            SourceDialect::Keepass => "keepass",
        }
    }

    /// Look up a dialect by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|d| d.as_str() == name)
    }

    /// Look up a dialect by name, falling back to [`SourceDialect::DEFAULT`]
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            warn!(dialect = name, fallback = Self::DEFAULT.as_str(), "unknown dialect, using default mapping");
            Self::DEFAULT
        })
    }

    /// Guess the dialect from a header row (see [`detect_dialect`])
    pub fn detect(headers: &[String]) -> Option<Self> {
        detect_dialect(headers)
    }

    /// Header mapping for this dialect
    pub fn field_map(&self) -> &'static FieldMap {
        DIALECT_TABLE
            .iter()
            .find(|(d, _)| d == self)
            .map(|(_, map)| map)
            .unwrap_or(&DEFAULT_FIELD_MAP)
    }
}

impl fmt::Display for SourceDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceDialect {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
            .ok_or_else(|| SyncError::InvalidOperation(format!("Unknown dialect: {}", s)))
    }
}
