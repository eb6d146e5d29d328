//! CSV tokenizer for password-manager exports
//!
//! Quoting rules follow the simplest real-world exporters:
//! - fields are separated by the delimiter (comma by default)
//! - a quote character toggles the in-quotes state and is dropped; doubled
//!   quotes are not unescaped
//! - delimiters inside quotes do not end the field
//!
//! The first non-blank line is the header row. Headers are trimmed and
//! lowercased, values are trimmed. Values hold passwords, so they are kept
//! in zeroizing buffers and wiped when the row is dropped.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{Result, SyncError};

/// Byte order mark some exporters put at the start of the file
const UTF8_BOM: char = '\u{feff}';

/// One data row: lowercase header name -> trimmed value
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the source text
    line: usize,
    fields: HashMap<String, Zeroizing<String>>,
}

impl RawRow {
    /// Create an empty row for the given source line
    pub fn new(line: usize) -> Self {
        Self {
            line,
            fields: HashMap::new(),
        }
    }

    /// Build a row from (header, value) pairs. Headers are normalized the
    /// same way the parser does it.
    pub fn from_pairs<'a>(line: usize, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut row = Self::new(line);
        for (header, value) in pairs {
            row.insert(header, value);
        }
        row
    }

    /// Insert a value, normalizing the header
    pub fn insert(&mut self, header: &str, value: &str) {
        self.fields
            .insert(header.trim().to_lowercase(), Zeroizing::new(value.trim().to_string()));
    }

    /// Get a value by (lowercase) header name
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields.get(header).map(|value| value.as_str())
    }

    /// Source line number
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of columns in the row
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the row has no columns
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// Rows carry secret values, so only the header names are printed.
impl fmt::Debug for RawRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut headers: Vec<&String> = self.fields.keys().collect();
        headers.sort();
        f.debug_struct("RawRow")
            .field("line", &self.line)
            .field("headers", &headers)
            .finish()
    }
}

/// Parsed CSV text: header row plus data rows in source order
#[derive(Debug, Clone, Default)]
pub struct CsvDocument {
    /// Lowercased, trimmed header names in column order
    pub headers: Vec<String>,
    /// Data rows in source order
    pub rows: Vec<RawRow>,
}

/// CSV parser with configurable delimiter and quote characters
#[derive(Debug, Clone)]
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: char,
    /// Quote character (default: double quote)
    quote: char,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set custom quote character
    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    /// Parse CSV text into data rows
    ///
    /// Text with fewer than two non-blank lines yields no rows.
    pub fn parse(&self, content: &str) -> Vec<RawRow> {
        self.parse_document(content).rows
    }

    /// Parse CSV text into headers and data rows
    pub fn parse_document(&self, content: &str) -> CsvDocument {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

        let mut lines = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((_, header_line)) = lines.next() else {
            return CsvDocument::default();
        };

        let headers: Vec<String> = self
            .split_line(header_line)
            .iter()
            .map(|h| h.to_lowercase())
            .collect();

        let mut rows = Vec::new();
        for (index, line) in lines {
            let values: Vec<Zeroizing<String>> =
                self.split_line(line).into_iter().map(Zeroizing::new).collect();
            let mut row = RawRow::new(index + 1);
            for (i, header) in headers.iter().enumerate() {
                let value = values.get(i).map(|v| v.as_str()).unwrap_or("");
                row.insert(header, value);
            }
            rows.push(row);
        }

        debug!(columns = headers.len(), rows = rows.len(), "parsed CSV document");

        CsvDocument { headers, rows }
    }

    /// Read and parse a CSV file
    pub fn parse_file(&self, path: &Path) -> Result<CsvDocument> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8(bytes).map(Zeroizing::new).map_err(|e| {
            let valid_up_to = e.utf8_error().valid_up_to();
            drop(Zeroizing::new(e.into_bytes()));
            SyncError::ParseError(format!(
                "{} is not valid UTF-8 (byte {})",
                path.display(),
                valid_up_to
            ))
        })?;
        Ok(self.parse_document(&content))
    }

    /// Split one line into trimmed field values
    pub fn split_line(&self, line: &str) -> Vec<String> {
        let mut values = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;

        for c in line.chars() {
            if c == self.quote {
                in_quotes = !in_quotes;
            } else if c == self.delimiter && !in_quotes {
                values.push(current.trim().to_string());
                current.clear();
            } else {
                current.push(c);
            }
        }
        values.push(current.trim().to_string());

        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_simple() {
        let csv = "name,url,username,password\nGitHub,https://github.com,alice,secret";
        let rows = CsvParser::new().parse(csv);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some("GitHub"));
        assert_eq!(rows[0].get("url"), Some("https://github.com"));
        assert_eq!(rows[0].get("username"), Some("alice"));
        assert_eq!(rows[0].get("password"), Some("secret"));
        assert_eq!(rows[0].line(), 2);
    }

    #[test]
    fn test_headers_lowercased_and_trimmed() {
        let csv = " Title , URL ,Username\nx,y,z";
        let doc = CsvParser::new().parse_document(csv);
        assert_eq!(doc.headers, vec!["title", "url", "username"]);
        assert_eq!(doc.rows[0].get("url"), Some("y"));
    }

    #[test]
    fn test_quoted_comma() {
        let csv = "name,url\n\"Shop, Inc\",\"https://shop.example\"";
        let rows = CsvParser::new().parse(csv);
        assert_eq!(rows[0].get("name"), Some("Shop, Inc"));
        assert_eq!(rows[0].get("url"), Some("https://shop.example"));
    }

    #[test]
    fn test_doubled_quotes_not_unescaped() {
        let parser = CsvParser::new();
        // Each quote toggles the state and is dropped
        assert_eq!(parser.split_line("\"say \"\"hi\"\"\",b"), vec!["say hi", "b"]);
        assert_eq!(parser.split_line("a\"b,c\"d,e"), vec!["ab,cd", "e"]);
    }

    #[test]
    fn test_header_only_yields_no_rows() {
        let rows = CsvParser::new().parse("name,url,username,password\n");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(CsvParser::new().parse("").is_empty());
        let doc = CsvParser::new().parse_document("   \n\n");
        assert!(doc.headers.is_empty());
        assert!(doc.rows.is_empty());
    }

    #[test]
    fn test_missing_trailing_fields_default_empty() {
        let csv = "url,username,password\nhttps://a.com,bob";
        let rows = CsvParser::new().parse(csv);
        assert_eq!(rows[0].get("username"), Some("bob"));
        assert_eq!(rows[0].get("password"), Some(""));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let csv = "url\nhttps://a.com,extra,more";
        let rows = CsvParser::new().parse(csv);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0].get("url"), Some("https://a.com"));
    }

    #[test]
    fn test_crlf_blank_lines_and_bom() {
        let csv = "\u{feff}url,username\r\n\r\nhttps://a.com,x\r\n\r\nhttps://b.com,y\r\n";
        let rows = CsvParser::new().parse(csv);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("url"), Some("https://a.com"));
        assert_eq!(rows[1].get("username"), Some("y"));
        assert_eq!(rows[1].line(), 5);
    }

    #[test]
    fn test_values_trimmed() {
        let rows = CsvParser::new().parse("url,username\n  https://a.com  ,  bob ");
        assert_eq!(rows[0].get("url"), Some("https://a.com"));
        assert_eq!(rows[0].get("username"), Some("bob"));
    }

    #[test]
    fn test_custom_delimiter() {
        let parser = CsvParser::new().with_delimiter(';');
        let rows = parser.parse("url;username\nhttps://a.com;bob");
        assert_eq!(rows[0].get("username"), Some("bob"));
    }

    #[test]
    fn test_custom_quote() {
        let parser = CsvParser::new().with_quote('\'');
        let rows = parser.parse("name,url\n'Shop, Inc',\"https://shop.example\"");
        assert_eq!(rows[0].get("name"), Some("Shop, Inc"));
        assert_eq!(rows[0].get("url"), Some("\"https://shop.example\""));
    }

    #[test]
    fn test_values_held_in_zeroizing_buffers() {
        let rows = CsvParser::new().parse("url,password\nhttps://a.com,topsecret");
        let stored: &Zeroizing<String> = rows[0].fields.get("password").unwrap();
        assert_eq!(stored.as_str(), "topsecret");

        let copy = rows[0].clone();
        drop(rows);
        assert_eq!(copy.get("password"), Some("topsecret"));
    }

    #[test]
    fn test_debug_hides_values() {
        let rows = CsvParser::new().parse("url,password\nhttps://a.com,topsecret");
        let printed = format!("{:?}", rows[0]);
        assert!(printed.contains("password"));
        assert!(!printed.contains("topsecret"));
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("export.csv");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"url,username\nhttps://a.com,bob\n").unwrap();

        let doc = CsvParser::new().parse_file(&path).unwrap();
        assert_eq!(doc.rows.len(), 1);
    }

    #[test]
    fn test_parse_file_invalid_utf8() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, [0x75, 0x72, 0x6c, 0x0a, 0xff, 0xfe]).unwrap();

        let result = CsvParser::new().parse_file(&path);
        assert!(matches!(result, Err(SyncError::ParseError(_))));
    }
}
