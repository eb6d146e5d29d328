//! Dialect-aware CSV parsing
//!
//! Turns exported credential CSV text into [`RawRow`] mappings keyed by
//! lowercase header name.

mod parser;

pub use parser::{CsvDocument, CsvParser, RawRow};
