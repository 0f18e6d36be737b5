//! Response DTOs for Web API.

use serde::Serialize;

use crate::datetime;
use crate::db::Account;
use crate::mailbox::Message;

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Account DTOs
// ============================================================================

/// Account details in responses.
///
/// Never carries the password hash or the verification code.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Whether the account is verified.
    pub is_verified: bool,
    /// Whether the inbox accepts new messages.
    pub is_accepting_messages: bool,
    /// Account creation timestamp (RFC 3339).
    pub created_at: String,
}

impl AccountResponse {
    /// Build a response from an account row.
    pub fn from_account(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            is_verified: account.is_verified,
            is_accepting_messages: account.is_accepting_messages,
            created_at: datetime::to_rfc3339(&account.created_at),
        }
    }
}

/// Compact account identity used inside other responses.
#[derive(Debug, Serialize)]
pub struct AccountInfo {
    /// Account ID.
    pub id: i64,
    /// Username.
    pub username: String,
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Access token (JWT).
    pub access_token: String,
    /// Access token expiry in seconds.
    pub expires_in: u64,
    /// Account information.
    pub user: AccountInfo,
}

/// Acceptance gate response.
#[derive(Debug, Serialize)]
pub struct AcceptanceResponse {
    /// Whether the inbox accepts new messages.
    pub is_accepting_messages: bool,
}

/// Username availability response.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    /// Whether the username is free to claim.
    pub available: bool,
}

// ============================================================================
// Message DTOs
// ============================================================================

/// A message in the caller's inbox.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Message ID.
    pub id: i64,
    /// Message content.
    pub content: String,
    /// Delivery timestamp (RFC 3339).
    pub created_at: String,
}

impl MessageResponse {
    /// Build a response from a message row.
    pub fn from_message(message: &Message) -> Self {
        Self {
            id: message.id,
            content: message.content.clone(),
            created_at: datetime::to_rfc3339(&message.created_at),
        }
    }
}

/// Message deletion response.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Whether a message was actually removed.
    pub deleted: bool,
}
