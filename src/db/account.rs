//! Account model for whisperbox.
//!
//! An account owns an anonymous inbox. It starts unverified; the handle
//! and email only become reserved once the account verifies.

/// Account entity representing a registered inbox owner.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    /// Unique account ID.
    pub id: i64,
    /// Public handle (unique among verified accounts).
    pub username: String,
    /// Email address (unique among verified accounts).
    pub email: String,
    /// Password hash (Argon2).
    pub password_hash: String,
    /// Whether the email has been verified.
    pub is_verified: bool,
    /// Current verification code.
    pub verify_code: String,
    /// Verification code expiry timestamp.
    pub verify_code_expires_at: String,
    /// Whether the inbox accepts new messages.
    pub is_accepting_messages: bool,
    /// Account creation timestamp.
    pub created_at: String,
}

/// Data for creating a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Public handle.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Password hash (should be pre-hashed with Argon2).
    pub password_hash: String,
    /// Initial verification code.
    pub verify_code: String,
    /// Verification code expiry timestamp.
    pub verify_code_expires_at: String,
    /// Whether the inbox starts open (defaults to true).
    pub is_accepting_messages: bool,
}

impl NewAccount {
    /// Create a new account with the required fields.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        verify_code: impl Into<String>,
        verify_code_expires_at: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            verify_code: verify_code.into(),
            verify_code_expires_at: verify_code_expires_at.into(),
            is_accepting_messages: true,
        }
    }

    /// Set whether the inbox starts open.
    pub fn with_accepting(mut self, accepting: bool) -> Self {
        self.is_accepting_messages = accepting;
        self
    }
}

/// Data for updating an existing account.
///
/// Only scalar columns appear here. Messages live in their own table and
/// are never touched by an account update.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    /// New password hash (if changing password).
    pub password_hash: Option<String>,
    /// New verification code (always paired with a new expiry).
    pub verify_code: Option<String>,
    /// New verification code expiry.
    pub verify_code_expires_at: Option<String>,
    /// New verified status.
    pub is_verified: Option<bool>,
    /// New acceptance flag.
    pub is_accepting_messages: Option<bool>,
}

impl AccountUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new password hash.
    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    /// Set a new verification code and its expiry together.
    pub fn verification_code(
        mut self,
        code: impl Into<String>,
        expires_at: impl Into<String>,
    ) -> Self {
        self.verify_code = Some(code.into());
        self.verify_code_expires_at = Some(expires_at.into());
        self
    }

    /// Set the verified status.
    pub fn verified(mut self, verified: bool) -> Self {
        self.is_verified = Some(verified);
        self
    }

    /// Set the acceptance flag.
    pub fn accepting(mut self, accepting: bool) -> Self {
        self.is_accepting_messages = Some(accepting);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.password_hash.is_none()
            && self.verify_code.is_none()
            && self.verify_code_expires_at.is_none()
            && self.is_verified.is_none()
            && self.is_accepting_messages.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_defaults_to_accepting() {
        let account = NewAccount::new(
            "alice",
            "alice@example.com",
            "hash",
            "123456",
            "2024-01-15 10:30:00",
        );

        assert_eq!(account.username, "alice");
        assert_eq!(account.email, "alice@example.com");
        assert!(account.is_accepting_messages);
    }

    #[test]
    fn test_new_account_with_accepting() {
        let account = NewAccount::new(
            "bob",
            "bob@example.com",
            "hash",
            "654321",
            "2024-01-15 10:30:00",
        )
        .with_accepting(false);

        assert!(!account.is_accepting_messages);
    }

    #[test]
    fn test_account_update_builder() {
        let update = AccountUpdate::new()
            .password_hash("new-hash")
            .verification_code("999999", "2024-02-01 00:00:00")
            .verified(true);

        assert_eq!(update.password_hash.as_deref(), Some("new-hash"));
        assert_eq!(update.verify_code.as_deref(), Some("999999"));
        assert_eq!(
            update.verify_code_expires_at.as_deref(),
            Some("2024-02-01 00:00:00")
        );
        assert_eq!(update.is_verified, Some(true));
        assert!(update.is_accepting_messages.is_none());
        assert!(!update.is_empty());
    }

    #[test]
    fn test_account_update_empty() {
        let update = AccountUpdate::new();
        assert!(update.is_empty());
    }

    #[test]
    fn test_account_update_accepting_only() {
        let update = AccountUpdate::new().accepting(false);
        assert_eq!(update.is_accepting_messages, Some(false));
        assert!(update.password_hash.is_none());
        assert!(!update.is_empty());
    }
}
