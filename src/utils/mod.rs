//! Shared helpers: timestamps and identifiers

pub mod common;
pub mod id_gen;

pub use common::{format_timestamp, now_timestamp, parse_timestamp};
pub use id_gen::generate_account_id;
