//! Error types for whisperbox.

use thiserror::Error;

/// Common error type for whisperbox.
#[derive(Error, Debug)]
pub enum WhisperboxError {
    /// Database error.
    ///
    /// This is a generic database error that wraps errors from the storage
    /// backend. Database errors from sqlx are automatically converted.
    /// Safe to retry.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Operation not allowed for the target account.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// A verified account already holds the identifier.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The verification code has expired.
    #[error("verification code expired")]
    CodeExpired,

    /// The verification code does not match.
    #[error("incorrect verification code")]
    CodeIncorrect,

    /// Notification delivery error. The triggering write is not rolled back.
    /// Safe to retry.
    #[error("notification error: {0}")]
    Notify(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for WhisperboxError {
    fn from(e: sqlx::Error) -> Self {
        WhisperboxError::Database(e.to_string())
    }
}

/// Result type alias for whisperbox operations.
pub type Result<T> = std::result::Result<T, WhisperboxError>;
