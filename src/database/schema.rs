//! Database schema definitions

/// SQL to create the accounts table
///
/// No unique constraint on (domain, identity): the reconciliation engine
/// owns that invariant.
pub const CREATE_ACCOUNTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id                CHAR(32) NOT NULL PRIMARY KEY,
    domain            TEXT NOT NULL,
    url               TEXT NOT NULL,
    username          TEXT,
    email             TEXT,
    password_stored   INTEGER NOT NULL DEFAULT 0,
    password_strength TEXT NOT NULL DEFAULT 'unknown',
    category          TEXT NOT NULL DEFAULT 'other',
    source            TEXT NOT NULL DEFAULT '',
    created_at        TEXT,
    updated_at        TEXT
)
"#;

/// SQL to create the domain lookup index
pub const CREATE_DOMAIN_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_accounts_domain ON accounts (domain)
"#;

/// All schema statements in order
pub const CREATE_ALL_TABLES: &[&str] = &[
    CREATE_ACCOUNTS_TABLE,
    CREATE_DOMAIN_INDEX,
];
