//! # credsync
//!
//! Imports credential exports from browsers and password managers into one
//! de-duplicated account set, and wraps export files for transit through
//! untrusted shared storage.
//!
//! ## Features
//!
//! - Dialect-aware CSV parsing (Chrome, Edge, Brave, Firefox, Bitwarden,
//!   LastPass, 1Password, Dashlane, KeePass)
//! - Domain, identity and category normalization
//! - Reconciliation with idempotent provenance merging and dry runs
//! - SQLite account store
//! - AES-256-GCM file envelopes keyed with scrypt
//!
//! ## Example
//!
//! ```no_run
//! use credsync::{AccountStore, ImportOptions, Importer, SourceDialect};
//! use std::path::Path;
//!
//! let mut store = AccountStore::create(Path::new("/path/to/store")).unwrap();
//! let importer = Importer::new(ImportOptions::live());
//!
//! let summary = importer
//!     .import_file(&mut store, Path::new("chrome.csv"), SourceDialect::Chrome)
//!     .unwrap();
//! println!("imported {}, skipped {}", summary.imported(), summary.skipped);
//! ```

pub mod crypto;
pub mod csv;
pub mod database;
pub mod dialect;
pub mod error;
pub mod import;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod store;
pub mod utils;

// Re-export main types
pub use error::{SyncError, Result};
pub use csv::{CsvDocument, CsvParser, RawRow};
pub use dialect::{SourceDialect, map_row};
pub use model::{Category, Identity, NormalizedRecord, RawFields, SkipReason};
pub use normalize::{CategoryTable, Normalizer};
pub use reconcile::{
    AccountRepository, ImportOptions, MatchKey, MatchPolicy, Outcome, OutcomeKind, Plan, Reconciler,
};
pub use database::models::{AccountPatch, CategoryCount, StoredAccount};
pub use store::AccountStore;
pub use import::{ImportSummary, Importer, RowOutcome};
pub use crypto::{EncryptedBlob, KdfParams, TransportCodec};

/// Timestamp format used in the database
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator of the provenance list in `StoredAccount::source`
pub const PROVENANCE_SEPARATOR: &str = ",";

/// Strength label for imported accounts (secrets are never inspected)
pub const PASSWORD_STRENGTH_UNKNOWN: &str = "unknown";

/// Database filename inside a store folder
pub const DATABASE_FILENAME: &str = "accounts.db";

/// Envelope salt length
pub const SALT_LENGTH: usize = 32;

/// Envelope IV length
pub const IV_LENGTH: usize = 16;

/// GCM authentication tag length
pub const TAG_LENGTH: usize = 16;

/// Fixed-size envelope header: salt, IV and tag
pub const BLOB_HEADER_LENGTH: usize = SALT_LENGTH + IV_LENGTH + TAG_LENGTH;

/// Default scrypt cost, log2(N)
pub const SCRYPT_LOG_N: u8 = 14;

/// Default scrypt block size
pub const SCRYPT_R: u32 = 8;

/// Default scrypt parallelization
pub const SCRYPT_P: u32 = 1;
