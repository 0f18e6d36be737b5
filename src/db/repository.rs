//! Account repository for whisperbox.
//!
//! This module provides CRUD operations for accounts in the database.
//!
//! Handles and emails are only reserved by verified accounts, so lookups
//! that resolve a possibly-duplicated identifier prefer the verified row
//! and fall back to the oldest unverified one.

use sqlx::QueryBuilder;

use super::account::{Account, AccountUpdate, NewAccount};
use super::DbPool;
use crate::{Result, WhisperboxError};

const ACCOUNT_COLUMNS: &str = "id, username, email, password_hash, is_verified, \
     verify_code, verify_code_expires_at, is_accepting_messages, created_at";

/// Repository for account CRUD operations.
pub struct AccountRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new AccountRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new unverified account.
    ///
    /// Returns the created account with the assigned ID.
    pub async fn create(&self, new_account: &NewAccount) -> Result<Account> {
        let result = sqlx::query(
            "INSERT INTO accounts (username, email, password_hash, verify_code,
                                   verify_code_expires_at, is_accepting_messages)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_account.username)
        .bind(&new_account.email)
        .bind(&new_account.password_hash)
        .bind(&new_account.verify_code)
        .bind(&new_account.verify_code_expires_at)
        .bind(new_account.is_accepting_messages)
        .execute(self.pool)
        .await
        .map_err(|e| WhisperboxError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| WhisperboxError::NotFound("account".to_string()))
    }

    /// Get an account by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Account>> {
        let result = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| WhisperboxError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get an account by username (case-insensitive).
    ///
    /// When unverified duplicates share the handle, the verified row wins,
    /// then the oldest.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<Account>> {
        let result = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts
             WHERE username = ? COLLATE NOCASE
             ORDER BY is_verified DESC, id ASC LIMIT 1"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| WhisperboxError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get an account by email (case-insensitive).
    ///
    /// Same preference order as [`get_by_username`](Self::get_by_username).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Account>> {
        let result = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts
             WHERE email = ? COLLATE NOCASE
             ORDER BY is_verified DESC, id ASC LIMIT 1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| WhisperboxError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List every account registered under a username (case-insensitive).
    ///
    /// At most one of them can be verified; unverified duplicates follow
    /// in registration order.
    pub async fn list_by_username(&self, username: &str) -> Result<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts
             WHERE username = ? COLLATE NOCASE
             ORDER BY is_verified DESC, id ASC"
        ))
        .bind(username)
        .fetch_all(self.pool)
        .await
        .map_err(|e| WhisperboxError::Database(e.to_string()))?;

        Ok(accounts)
    }

    /// Get the verified account holding a username, if any.
    pub async fn get_verified_by_username(&self, username: &str) -> Result<Option<Account>> {
        let result = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts
             WHERE username = ? COLLATE NOCASE AND is_verified = 1"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| WhisperboxError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get the verified account holding an email, if any.
    pub async fn get_verified_by_email(&self, email: &str) -> Result<Option<Account>> {
        let result = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts
             WHERE email = ? COLLATE NOCASE AND is_verified = 1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| WhisperboxError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Update an account by ID.
    ///
    /// Only fields that are set in the update will be modified; the
    /// messages table is never touched. Returns the updated account, or
    /// None if not found. Setting `is_verified` on a handle or email that
    /// a verified account already holds fails with a Conflict.
    pub async fn update(&self, id: i64, update: &AccountUpdate) -> Result<Option<Account>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE accounts SET ");
        let mut separated = query.separated(", ");

        if let Some(ref password_hash) = update.password_hash {
            separated.push("password_hash = ");
            separated.push_bind_unseparated(password_hash);
        }
        if let Some(ref verify_code) = update.verify_code {
            separated.push("verify_code = ");
            separated.push_bind_unseparated(verify_code);
        }
        if let Some(ref expires_at) = update.verify_code_expires_at {
            separated.push("verify_code_expires_at = ");
            separated.push_bind_unseparated(expires_at);
        }
        if let Some(is_verified) = update.is_verified {
            separated.push("is_verified = ");
            separated.push_bind_unseparated(is_verified);
        }
        if let Some(is_accepting) = update.is_accepting_messages {
            separated.push("is_accepting_messages = ");
            separated.push_bind_unseparated(is_accepting);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await.map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") {
                WhisperboxError::Conflict(
                    "username or email already belongs to a verified account".to_string(),
                )
            } else {
                WhisperboxError::Database(msg)
            }
        })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete an account by ID.
    ///
    /// Returns true if an account was deleted, false if not found.
    /// Messages cascade.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| WhisperboxError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all accounts.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
            .fetch_one(self.pool)
            .await
            .map_err(|e| WhisperboxError::Database(e.to_string()))?;
        Ok(count.0)
    }
}
