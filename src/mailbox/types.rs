//! Message entity and builders for the mailbox.

use serde::{Deserialize, Serialize};

/// Minimum message content length in characters.
pub const MIN_CONTENT_LENGTH: usize = 10;

/// Maximum message content length in characters.
pub const MAX_CONTENT_LENGTH: usize = 300;

/// A message delivered to an account's mailbox.
///
/// Senders are anonymous; a message carries no author information.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    /// Message ID (database primary key)
    pub id: i64,
    /// Owning account ID
    pub account_id: i64,
    /// Message body
    pub content: String,
    /// Delivery timestamp
    pub created_at: String,
}

/// Data for appending a new message.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub account_id: i64,
    pub content: String,
}

impl NewMessage {
    /// Create a new message for an account.
    pub fn new(account_id: i64, content: impl Into<String>) -> Self {
        Self {
            account_id,
            content: content.into(),
        }
    }
}
