//! Error types for credsync

use thiserror::Error;

/// Main error type for import, storage and transport operations
#[derive(Error, Debug)]
pub enum SyncError {
    /// Database file not found at the specified path
    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    /// Backing store failed for a query or write
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// Input could not be read as CSV text
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Decryption rejected the blob. Carries no detail.
    #[error("Authentication failed")]
    AuthenticationFailure,

    /// Encryption failed
    #[error("Encryption error: {0}")]
    EncryptionError(String),

    /// Key derivation parameters were rejected
    #[error("Key derivation error: {0}")]
    KeyDerivationError(String),

    /// Stored account not found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl From<rusqlite::Error> for SyncError {
    fn from(err: rusqlite::Error) -> Self {
        SyncError::RepositoryError(err.to_string())
    }
}

/// Result type alias for credsync operations
pub type Result<T> = std::result::Result<T, SyncError>;
