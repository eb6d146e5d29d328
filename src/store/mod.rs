//! SQLite-backed account repository
//!
//! [`AccountStore`] is a handle owned by the caller: it is opened and closed
//! explicitly, and [`AccountStore::is_connected`] reports whether it can
//! serve requests.

mod accounts;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::database::Database;
use crate::error::{Result, SyncError};
use crate::DATABASE_FILENAME;

/// Account store over a SQLite database
pub struct AccountStore {
    /// Path to the database file
    pub(crate) path: PathBuf,
    /// Database connection
    pub(crate) db: Option<Database>,
}

impl AccountStore {
    /// Open an existing store from a folder
    ///
    /// The folder should contain an `accounts.db` file.
    pub fn open(folder: &Path) -> Result<Self> {
        let db_path = folder.join(DATABASE_FILENAME);
        let db = Database::open(&db_path)?;
        info!(path = %db_path.display(), "account store opened");

        Ok(Self {
            path: db_path,
            db: Some(db),
        })
    }

    /// Create a store in the specified folder (reuses an existing database)
    pub fn create(folder: &Path) -> Result<Self> {
        std::fs::create_dir_all(folder)?;

        let db_path = folder.join(DATABASE_FILENAME);
        let db = Database::create(&db_path)?;
        info!(path = %db_path.display(), "account store created");

        Ok(Self {
            path: db_path,
            db: Some(db),
        })
    }

    /// Create a store backed by an in-memory database
    pub fn in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self {
            path: db.path().to_path_buf(),
            db: Some(db),
        })
    }

    /// Check if the store holds an open connection
    pub fn is_connected(&self) -> bool {
        self.db.as_ref().is_some_and(Database::is_open)
    }

    /// Set how long a write waits on another importer's lock before the
    /// row fails as locked
    pub fn set_busy_timeout(&self, timeout: Duration) -> Result<()> {
        self.database()?.set_busy_timeout(timeout)
    }

    /// Close the store, flushing any WAL frames into the database file.
    /// Later calls fail with a repository error.
    pub fn close(&mut self) {
        if let Some(mut db) = self.db.take() {
            if let Err(e) = db.checkpoint() {
                warn!(error = %e, "checkpoint on close failed");
            }
            db.close();
            debug!(path = %self.path.display(), "account store closed");
        }
    }

    /// Get the database path
    pub fn database_path(&self) -> &Path {
        &self.path
    }

    /// Get a reference to the database
    pub fn database(&self) -> Result<&Database> {
        self.db.as_ref().ok_or_else(|| SyncError::RepositoryError("Database not open".to_string()))
    }

    pub(crate) fn database_mut(&mut self) -> Result<&mut Database> {
        self.db.as_mut().ok_or_else(|| SyncError::RepositoryError("Database not open".to_string()))
    }
}

impl Drop for AccountStore {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    pub fn create_test_store() -> (AccountStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = AccountStore::create(temp_dir.path()).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_create_and_reopen() {
        let (mut store, temp) = create_test_store();
        assert!(store.is_connected());
        assert_eq!(store.database_path(), temp.path().join("accounts.db"));

        store.close();
        assert!(!store.is_connected());
        assert!(store.database().is_err());

        let store = AccountStore::open(temp.path()).unwrap();
        assert!(store.is_connected());
    }

    #[test]
    fn test_close_flushes_wal() {
        let (store, temp) = create_test_store();
        let conn = store.database().unwrap().connection().unwrap();
        conn.execute_batch("PRAGMA journal_mode=WAL").unwrap();
        conn.execute(
            "INSERT INTO accounts (id, domain, url) VALUES ('a', 'x.com', 'https://x.com')",
            [],
        ).unwrap();

        let wal = temp.path().join("accounts.db-wal");
        assert!(std::fs::metadata(&wal).unwrap().len() > 0);

        drop(store);
        assert!(!wal.exists() || std::fs::metadata(&wal).unwrap().len() == 0);

        let store = AccountStore::open(temp.path()).unwrap();
        assert_eq!(store.count_accounts().unwrap(), 1);
    }

    #[test]
    fn test_open_nonexistent() {
        let result = AccountStore::open(Path::new("/nonexistent/path"));
        assert!(matches!(result, Err(SyncError::DatabaseNotFound(_))));
    }

    #[test]
    fn test_in_memory() {
        let store = AccountStore::in_memory().unwrap();
        assert!(store.is_connected());
    }
}
