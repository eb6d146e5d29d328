//! Guess the export dialect from a header row

use super::SourceDialect;

/// Header names that only one exporter produces
const SIGNATURES: &[(SourceDialect, &[&str])] = &[
    (SourceDialect::Bitwarden, &["login_uri"]),
    (SourceDialect::Firefox, &["httprealm", "formactionorigin", "guid"]),
    (SourceDialect::Lastpass, &["grouping"]),
    (SourceDialect::Onepassword, &["otpauth"]),
    (SourceDialect::Dashlane, &["username2"]),
    (SourceDialect::Keepass, &["group"]),
];

/// Detect the dialect of an export from its (lowercased) headers
///
/// Chrome, Edge and Brave share one layout and are reported as Chrome.
/// Returns `None` when the headers do not look like a credential export.
pub fn detect_dialect(headers: &[String]) -> Option<SourceDialect> {
    let has = |name: &str| headers.iter().any(|h| h == name);

    for (dialect, markers) in SIGNATURES {
        if markers.iter().any(|&m| has(m)) {
            return Some(*dialect);
        }
    }

    if has("url") && has("username") && has("password") {
        return Some(SourceDialect::Chrome);
    }

    None
}
