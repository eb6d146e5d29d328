//! SQL query operations for account storage
//!
//! Low-level query functions. For repository-level operations use
//! [`crate::AccountStore`].

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::models::{AccountPatch, CategoryCount, StoredAccount};
use crate::model::{Category, NormalizedRecord};
use crate::utils::{now_timestamp, parse_timestamp};
use crate::error::Result;

const ACCOUNT_COLUMNS: &str = "id, domain, url, username, email, password_stored, password_strength, \
     category, source, created_at, updated_at";

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<StoredAccount> {
    let category: String = row.get(7)?;
    let created_at: Option<String> = row.get(9)?;
    let updated_at: Option<String> = row.get(10)?;

    Ok(StoredAccount {
        id: row.get(0)?,
        domain: row.get(1)?,
        url: row.get(2)?,
        username: row.get(3)?,
        email: row.get(4)?,
        password_stored: row.get::<_, i32>(5)? != 0,
        password_strength: row.get(6)?,
        category: Category::from_label(&category),
        source: row.get(8)?,
        created_at: created_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or_else(Utc::now),
        updated_at: updated_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or_else(Utc::now),
    })
}

// ============================================================================
// Account reads
// ============================================================================

/// Get an account by ID
pub fn get_account(conn: &Connection, id: &str) -> Result<Option<StoredAccount>> {
    let sql = format!("SELECT {} FROM accounts WHERE id = ?", ACCOUNT_COLUMNS);
    let account = conn
        .query_row(&sql, params![id], account_from_row)
        .optional()?;
    Ok(account)
}

/// Get all accounts on a domain, oldest first
pub fn get_accounts_by_domain(conn: &Connection, domain: &str) -> Result<Vec<StoredAccount>> {
    let sql = format!(
        "SELECT {} FROM accounts WHERE domain = ? ORDER BY created_at, rowid",
        ACCOUNT_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let accounts = stmt.query_map(params![domain], account_from_row)?;
    accounts.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
}

/// Get all accounts ordered by domain
pub fn get_all_accounts(conn: &Connection) -> Result<Vec<StoredAccount>> {
    let sql = format!(
        "SELECT {} FROM accounts ORDER BY domain, rowid",
        ACCOUNT_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let accounts = stmt.query_map([], account_from_row)?;
    accounts.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
}

/// Count stored accounts
pub fn count_accounts(conn: &Connection) -> Result<u32> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))?;
    Ok(count as u32)
}

/// Count accounts per category, largest first
pub fn get_category_counts(conn: &Connection) -> Result<Vec<CategoryCount>> {
    let mut stmt = conn.prepare(
        "SELECT category, COUNT(*) AS total FROM accounts GROUP BY category ORDER BY total DESC, category"
    )?;

    let counts = stmt.query_map([], |row| {
        let category: String = row.get(0)?;
        Ok(CategoryCount {
            category: Category::from_label(&category),
            count: row.get::<_, i64>(1)? as u32,
        })
    })?;

    counts.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
}

// ============================================================================
// Account writes
// ============================================================================

/// Insert a new account built from a normalized record
pub fn insert_account(
    conn: &Connection,
    id: &str,
    record: &NormalizedRecord,
    password_strength: &str,
) -> Result<()> {
    let now = now_timestamp();
    conn.execute(
        "INSERT INTO accounts (id, domain, url, username, email, password_stored, password_strength,
                               category, source, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            id,
            record.domain,
            record.url,
            record.identity.username,
            record.identity.email,
            record.has_secret as i32,
            password_strength,
            record.category.as_str(),
            record.source.as_str(),
            now,
            now
        ],
    )?;
    Ok(())
}

/// Apply a patch to an account and bump its update timestamp
///
/// Returns `false` if no account has the given ID.
pub fn update_account(conn: &Connection, id: &str, patch: &AccountPatch) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE accounts SET url = ?, password_stored = ?, source = ?, updated_at = ? WHERE id = ?",
        params![patch.url, patch.password_stored as i32, patch.source, now_timestamp(), id],
    )?;
    Ok(changed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::dialect::SourceDialect;
    use crate::model::Identity;

    fn record(domain: &str, identity: Identity, category: Category) -> NormalizedRecord {
        NormalizedRecord {
            domain: domain.to_string(),
            url: format!("https://{}", domain),
            identity,
            has_secret: true,
            category,
            source: SourceDialect::Chrome,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection().unwrap();

        let rec = record("github.com", Identity::username("alice"), Category::Development);
        insert_account(conn, "id1", &rec, "unknown").unwrap();

        let account = get_account(conn, "id1").unwrap().unwrap();
        assert_eq!(account.domain, "github.com");
        assert_eq!(account.username.as_deref(), Some("alice"));
        assert!(account.email.is_none());
        assert!(account.password_stored);
        assert_eq!(account.category, Category::Development);
        assert_eq!(account.source, "chrome");

        assert!(get_account(conn, "missing").unwrap().is_none());
    }

    #[test]
    fn test_update_account() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection().unwrap();

        let rec = record("github.com", Identity::username("alice"), Category::Development);
        insert_account(conn, "id1", &rec, "unknown").unwrap();

        let patch = AccountPatch {
            url: "https://github.com/login".to_string(),
            password_stored: false,
            source: "chrome,firefox".to_string(),
        };
        assert!(update_account(conn, "id1", &patch).unwrap());
        assert!(!update_account(conn, "missing", &patch).unwrap());

        let account = get_account(conn, "id1").unwrap().unwrap();
        assert_eq!(account.url, "https://github.com/login");
        assert!(!account.password_stored);
        assert_eq!(account.source, "chrome,firefox");
    }

    #[test]
    fn test_accounts_by_domain_and_counts() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection().unwrap();

        insert_account(conn, "a", &record("github.com", Identity::username("alice"), Category::Development), "unknown").unwrap();
        insert_account(conn, "b", &record("github.com", Identity::username("bob"), Category::Development), "unknown").unwrap();
        insert_account(conn, "c", &record("netflix.com", Identity::email("a@b.com"), Category::Streaming), "unknown").unwrap();

        let github = get_accounts_by_domain(conn, "github.com").unwrap();
        assert_eq!(github.len(), 2);
        assert_eq!(github[0].id, "a");
        assert_eq!(github[1].id, "b");

        assert_eq!(count_accounts(conn).unwrap(), 3);
        assert_eq!(get_all_accounts(conn).unwrap().len(), 3);

        let counts = get_category_counts(conn).unwrap();
        assert_eq!(counts[0], CategoryCount { category: Category::Development, count: 2 });
        assert_eq!(counts[1], CategoryCount { category: Category::Streaming, count: 1 });
    }
}
