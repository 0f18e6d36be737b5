//! Database schema and migrations for whisperbox.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - accounts table
    r#"
-- Accounts table for sign-up and verification state
CREATE TABLE accounts (
    id                      INTEGER PRIMARY KEY AUTOINCREMENT,
    username                TEXT NOT NULL COLLATE NOCASE,  -- public handle
    email                   TEXT NOT NULL COLLATE NOCASE,
    password_hash           TEXT NOT NULL,     -- Argon2 hash
    is_verified             INTEGER NOT NULL DEFAULT 0,
    verify_code             TEXT NOT NULL,     -- 6-digit code
    verify_code_expires_at  TEXT NOT NULL,
    is_accepting_messages   INTEGER NOT NULL DEFAULT 1,
    created_at              TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_accounts_username ON accounts(username);
CREATE INDEX idx_accounts_email ON accounts(email);

-- Handles and emails are unique among verified accounts only, compared
-- case-insensitively via the column collation. Unverified duplicates may
-- coexist until one of them verifies.
CREATE UNIQUE INDEX idx_accounts_verified_username
    ON accounts(username) WHERE is_verified = 1;
CREATE UNIQUE INDEX idx_accounts_verified_email
    ON accounts(email) WHERE is_verified = 1;
"#,
    // v2: Messages table for anonymous inbox entries
    r#"
-- Messages table; id order doubles as insertion order for tie-breaks
CREATE TABLE messages (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    account_id  INTEGER NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_messages_account_id ON messages(account_id);
CREATE INDEX idx_messages_created_at ON messages(created_at);
"#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
        for migration in MIGRATIONS {
            assert!(!migration.trim().is_empty());
        }
    }

    #[test]
    fn test_first_migration_creates_accounts() {
        assert!(MIGRATIONS[0].contains("CREATE TABLE accounts"));
    }

    #[test]
    fn test_second_migration_creates_messages() {
        assert!(MIGRATIONS[1].contains("CREATE TABLE messages"));
    }
}
