//! Provenance list handling

use crate::PROVENANCE_SEPARATOR;

/// Append `source` to a comma-joined provenance list unless already present
///
/// Blank entries in the existing list are dropped. Merging the same source
/// twice returns the same list.
pub fn merge_provenance(existing: &str, source: &str) -> String {
    let source = source.trim();
    let mut entries: Vec<&str> = existing
        .split(PROVENANCE_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if !source.is_empty() && !entries.contains(&source) {
        entries.push(source);
    }

    entries.join(PROVENANCE_SEPARATOR)
}
