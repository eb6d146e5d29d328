//! Field mapper: RawRow + dialect -> canonical raw fields

use zeroize::Zeroizing;

use super::SourceDialect;
use crate::csv::RawRow;
use crate::model::{RawFields, SkipReason};

/// Look up a canonical field: the dialect's header first, then the literal
/// field name when that is absent or empty.
fn lookup<'a>(row: &'a RawRow, dialect_header: &str, fallback: &str) -> &'a str {
    match row.get(dialect_header) {
        Some(value) if !value.is_empty() => value,
        _ => row.get(fallback).unwrap_or(""),
    }
}

/// Translate a parsed row into canonical fields
///
/// Rows without a resolvable URL are rejected with [`SkipReason::MissingUrl`].
pub fn map_row(row: &RawRow, dialect: SourceDialect) -> Result<RawFields, SkipReason> {
    let map = dialect.field_map();

    let url = lookup(row, map.url, "url");
    if url.is_empty() {
        return Err(SkipReason::MissingUrl);
    }

    Ok(RawFields {
        url: url.to_string(),
        username: lookup(row, map.username, "username").to_string(),
        password: Zeroizing::new(lookup(row, map.password, "password").to_string()),
        name: lookup(row, map.name, "name").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrome_row() {
        let row = RawRow::from_pairs(2, [
            ("name", "GitHub"),
            ("url", "https://github.com"),
            ("username", "alice"),
            ("password", "x"),
        ]);
        let fields = map_row(&row, SourceDialect::Chrome).unwrap();
        assert_eq!(fields.url, "https://github.com");
        assert_eq!(fields.username, "alice");
        assert_eq!(fields.password.as_str(), "x");
        assert_eq!(fields.name, "GitHub");
    }

    #[test]
    fn test_bitwarden_row() {
        let row = RawRow::from_pairs(2, [
            ("name", "Netflix"),
            ("login_uri", "https://netflix.com"),
            ("login_username", "a@b.com"),
            ("login_password", "pw"),
        ]);
        let fields = map_row(&row, SourceDialect::Bitwarden).unwrap();
        assert_eq!(fields.url, "https://netflix.com");
        assert_eq!(fields.username, "a@b.com");
        assert_eq!(fields.password.as_str(), "pw");
    }

    #[test]
    fn test_falls_back_to_literal_names() {
        // Bitwarden dialect declared but the export used generic headers
        let row = RawRow::from_pairs(2, [
            ("url", "https://a.com"),
            ("username", "bob"),
            ("password", "pw"),
        ]);
        let fields = map_row(&row, SourceDialect::Bitwarden).unwrap();
        assert_eq!(fields.url, "https://a.com");
        assert_eq!(fields.username, "bob");
        assert_eq!(fields.password.as_str(), "pw");
    }

    #[test]
    fn test_empty_dialect_value_falls_back() {
        let row = RawRow::from_pairs(2, [
            ("login_uri", ""),
            ("url", "https://fallback.com"),
        ]);
        let fields = map_row(&row, SourceDialect::Bitwarden).unwrap();
        assert_eq!(fields.url, "https://fallback.com");
    }

    #[test]
    fn test_missing_url_skipped() {
        let row = RawRow::from_pairs(2, [("username", "bob"), ("password", "pw")]);
        assert_eq!(map_row(&row, SourceDialect::Chrome).unwrap_err(), SkipReason::MissingUrl);

        let row = RawRow::from_pairs(3, [("url", ""), ("username", "bob")]);
        assert_eq!(map_row(&row, SourceDialect::Chrome).unwrap_err(), SkipReason::MissingUrl);
    }

    #[test]
    fn test_title_dialects_use_title_for_name() {
        let row = RawRow::from_pairs(2, [("title", "Bank"), ("url", "bank.com")]);
        let fields = map_row(&row, SourceDialect::Keepass).unwrap();
        assert_eq!(fields.name, "Bank");
    }
}
