//! Account operations
//!
//! Repository implementation used by the reconciliation engine, plus the
//! read-only query interface for consumers of the reconciled data.

use tracing::warn;

use super::AccountStore;
use crate::database::{AccountPatch, CategoryCount, StoredAccount, queries};
use crate::error::{Result, SyncError};
use crate::model::NormalizedRecord;
use crate::reconcile::{AccountRepository, MatchKey};
use crate::utils::generate_account_id;
use crate::PASSWORD_STRENGTH_UNKNOWN;

impl AccountRepository for AccountStore {
    fn find_matching(&self, key: &MatchKey) -> Result<Option<StoredAccount>> {
        let conn = self.database()?.connection()?;
        let candidates = queries::get_accounts_by_domain(conn, &key.domain)?;
        Ok(candidates.into_iter().find(|account| key.matches(account)))
    }

    fn create(&mut self, record: &NormalizedRecord) -> Result<StoredAccount> {
        let id = generate_account_id();
        let conn = self.database()?.connection()?;

        queries::insert_account(conn, &id, record, PASSWORD_STRENGTH_UNKNOWN)?;

        queries::get_account(conn, &id)?
            .ok_or_else(|| SyncError::AccountNotFound(id))
    }

    fn update(&mut self, id: &str, patch: &AccountPatch) -> Result<StoredAccount> {
        let conn = self.database()?.connection()?;

        if !queries::update_account(conn, id, patch)? {
            return Err(SyncError::AccountNotFound(id.to_string()));
        }

        queries::get_account(conn, id)?
            .ok_or_else(|| SyncError::AccountNotFound(id.to_string()))
    }

    /// Runs `f` inside an immediate transaction, so a concurrent importer
    /// cannot create the same key between our lookup and our write.
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.database_mut()?.begin_transaction()?;

        let result = f(self).and_then(|value| {
            self.database_mut()?.commit_transaction()?;
            Ok(value)
        });

        // A failed COMMIT leaves the transaction open on this connection.
        if result.is_err() {
            self.rollback_quietly();
        }
        result
    }
}

impl AccountStore {
    /// Get an account by ID
    pub fn get_account(&self, id: &str) -> Result<Option<StoredAccount>> {
        queries::get_account(self.database()?.connection()?, id)
    }

    /// Get all accounts, ordered by domain
    pub fn list_accounts(&self) -> Result<Vec<StoredAccount>> {
        queries::get_all_accounts(self.database()?.connection()?)
    }

    /// Get all accounts on a domain
    pub fn accounts_for_domain(&self, domain: &str) -> Result<Vec<StoredAccount>> {
        queries::get_accounts_by_domain(self.database()?.connection()?, domain)
    }

    /// Count stored accounts
    pub fn count_accounts(&self) -> Result<u32> {
        queries::count_accounts(self.database()?.connection()?)
    }

    /// Account counts per category, largest first
    pub fn category_summary(&self) -> Result<Vec<CategoryCount>> {
        queries::get_category_counts(self.database()?.connection()?)
    }

    fn rollback_quietly(&mut self) {
        if let Err(rollback_err) = self.database_mut().and_then(|db| db.rollback_transaction()) {
            warn!(error = %rollback_err, "rollback failed");
        }
    }
}
