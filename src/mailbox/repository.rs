//! Message repository for whisperbox.
//!
//! Append, list and delete operations for per-account mailboxes. Every
//! operation touches only the messages table, so mailbox contents survive
//! any account-field update that happens concurrently.

use super::types::{Message, NewMessage};
use crate::db::DbPool;
use crate::{Result, WhisperboxError};

const MESSAGE_COLUMNS: &str = "id, account_id, content, created_at";

/// Repository for mailbox message operations.
pub struct MessageRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new MessageRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Append a message to an account's mailbox.
    ///
    /// Returns the stored message with its assigned ID. Appending to an
    /// account that does not exist fails with NotFound.
    pub async fn append(&self, new_message: &NewMessage) -> Result<Message> {
        let result = sqlx::query("INSERT INTO messages (account_id, content) VALUES (?, ?)")
            .bind(new_message.account_id)
            .bind(&new_message.content)
            .execute(self.pool)
            .await
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("FOREIGN KEY") {
                    WhisperboxError::NotFound("account".to_string())
                } else {
                    WhisperboxError::Database(msg)
                }
            })?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| WhisperboxError::NotFound("message".to_string()))
    }

    /// Get a message by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Message>> {
        let result = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| WhisperboxError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List an account's messages, newest first.
    ///
    /// Messages sharing a timestamp come back in reverse insertion order,
    /// which the id tie-break guarantees. An account with no messages (or
    /// no account at all) yields an empty list.
    pub async fn list_descending(&self, account_id: i64) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages
             WHERE account_id = ?
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(account_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| WhisperboxError::Database(e.to_string()))?;

        Ok(messages)
    }

    /// Delete a message from an account's mailbox.
    ///
    /// Scoped to the owning account so a caller cannot delete another
    /// mailbox's messages by guessing IDs. Returns true if a message was
    /// deleted, false if it was already gone.
    pub async fn delete_by_id(&self, account_id: i64, message_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ? AND account_id = ?")
            .bind(message_id)
            .bind(account_id)
            .execute(self.pool)
            .await
            .map_err(|e| WhisperboxError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// Count messages in an account's mailbox.
    pub async fn count(&self, account_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages WHERE account_id = ?")
            .bind(account_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| WhisperboxError::Database(e.to_string()))?;
        Ok(count.0)
    }
}
