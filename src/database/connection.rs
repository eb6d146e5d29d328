//! Database connection management

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;
use tracing::debug;

use super::schema;
use crate::error::{Result, SyncError};

/// Path recorded for in-memory databases
const IN_MEMORY_PATH: &str = ":memory:";

/// Database connection wrapper
pub struct Database {
    /// Path to the database file
    path: PathBuf,
    /// SQLite connection
    conn: Option<Connection>,
}

impl Database {
    /// Open an existing database at the specified path
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SyncError::DatabaseNotFound(path.to_string_lossy().to_string()));
        }

        let conn = Connection::open(path)?;
        Self::ensure_schema(&conn)?;
        debug!(path = %path.display(), "opened account database");

        Ok(Self {
            path: path.to_path_buf(),
            conn: Some(conn),
        })
    }

    /// Create a new database with all tables
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::ensure_schema(&conn)?;
        debug!(path = %path.display(), "created account database");

        Ok(Self {
            path: path.to_path_buf(),
            conn: Some(conn),
        })
    }

    /// Create a throwaway in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::ensure_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(IN_MEMORY_PATH),
            conn: Some(conn),
        })
    }

    fn ensure_schema(conn: &Connection) -> Result<()> {
        for sql in schema::CREATE_ALL_TABLES {
            conn.execute(sql, [])?;
        }
        Ok(())
    }

    /// Get a reference to the connection
    pub fn connection(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or_else(|| {
            SyncError::RepositoryError("Database not open".to_string())
        })
    }

    /// Get the database path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the database connection
    pub fn close(&mut self) {
        self.conn = None;
    }

    /// Check if database is open
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Set how long a statement waits on another connection's lock before
    /// failing with "database is locked"
    pub fn set_busy_timeout(&self, timeout: Duration) -> Result<()> {
        self.connection()?.busy_timeout(timeout)?;
        Ok(())
    }

    /// Begin a write transaction, taking the write lock immediately
    pub fn begin_transaction(&mut self) -> Result<()> {
        self.connection()?.execute("BEGIN IMMEDIATE TRANSACTION", [])?;
        Ok(())
    }

    /// Commit a transaction
    pub fn commit_transaction(&mut self) -> Result<()> {
        self.connection()?.execute("COMMIT", [])?;
        Ok(())
    }

    /// Rollback a transaction
    pub fn rollback_transaction(&mut self) -> Result<()> {
        self.connection()?.execute("ROLLBACK", [])?;
        Ok(())
    }

    /// Force a WAL checkpoint to write all data to the main database file
    ///
    /// Uses TRUNCATE mode which checkpoints all frames and truncates the WAL file.
    pub fn checkpoint(&self) -> Result<()> {
        self.connection()?.execute_batch("PRAGMA wal_checkpoint(TRUNCATE)")?;
        Ok(())
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("accounts.db");

        let mut db = Database::create(&db_path).unwrap();
        assert!(db.is_open());
        assert_eq!(db.path(), db_path.as_path());
        db.close();
        assert!(!db.is_open());
        assert!(db.connection().is_err());

        let db = Database::open(&db_path).unwrap();
        assert!(db.is_open());
    }

    #[test]
    fn test_open_missing() {
        let result = Database::open(Path::new("/nonexistent/accounts.db"));
        assert!(matches!(result, Err(SyncError::DatabaseNotFound(_))));
    }

    #[test]
    fn test_rollback_discards_writes() {
        let mut db = Database::open_in_memory().unwrap();
        db.begin_transaction().unwrap();
        db.connection().unwrap().execute(
            "INSERT INTO accounts (id, domain, url) VALUES ('a', 'x.com', 'https://x.com')",
            [],
        ).unwrap();
        db.rollback_transaction().unwrap();

        let count: i64 = db.connection().unwrap()
            .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_checkpoint_after_write() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::create(&temp_dir.path().join("accounts.db")).unwrap();
        db.connection().unwrap().execute_batch("PRAGMA journal_mode=WAL").unwrap();
        db.connection().unwrap().execute(
            "INSERT INTO accounts (id, domain, url) VALUES ('a', 'x.com', 'https://x.com')",
            [],
        ).unwrap();
        db.checkpoint().unwrap();
    }

    #[test]
    fn test_busy_timeout_bounds_lock_wait() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("accounts.db");
        let mut db = Database::create(&db_path).unwrap();
        db.set_busy_timeout(Duration::from_millis(20)).unwrap();

        let other = Connection::open(&db_path).unwrap();
        other.execute_batch("BEGIN IMMEDIATE").unwrap();

        assert!(db.begin_transaction().is_err());

        other.execute_batch("ROLLBACK").unwrap();
        db.begin_transaction().unwrap();
        db.rollback_transaction().unwrap();

        db.close();
        assert!(db.set_busy_timeout(Duration::from_millis(20)).is_err());
    }
}
