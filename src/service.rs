//! Core mailbox service for whisperbox.
//!
//! This module ties the account store, the mailbox store and the notifier
//! together into the operations the outside world sees: sign-up with
//! email verification, the acceptance gate, anonymous sending, and inbox
//! management. Every operation re-reads current state from the database,
//! so concurrent callers always act on fresh rows.

use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::{hash_password, validate_registration, validate_username, verify_password};
use crate::db::{Account, AccountRepository, AccountUpdate, Database, NewAccount};
use crate::mailbox::{Message, MessageRepository, NewMessage, MAX_CONTENT_LENGTH, MIN_CONTENT_LENGTH};
use crate::notify::Notifier;
use crate::verification::{check_code, issue_code, CodeCheck};
use crate::{Result, WhisperboxError};

/// The identity of a logged-in caller, as established by the web layer.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller {
    /// Account ID.
    pub account_id: i64,
    /// Username at the time of authentication.
    pub username: String,
}

/// Request to sign up a new account.
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    /// Desired username.
    pub username: String,
    /// Email address for verification.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

impl SignUpRequest {
    /// Create a new sign-up request.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Service for mailbox operations.
#[derive(Clone)]
pub struct MailboxService {
    db: Database,
    notifier: Arc<dyn Notifier>,
    code_ttl_secs: i64,
}

impl MailboxService {
    /// Create a new MailboxService.
    pub fn new(db: Database, notifier: Arc<dyn Notifier>, code_ttl_secs: i64) -> Self {
        Self {
            db,
            notifier,
            code_ttl_secs,
        }
    }

    /// Sign up a new account and send it a verification code.
    ///
    /// A username already held by a verified account is a conflict. An
    /// email held by an unverified account refreshes that account's
    /// password and verification window instead of creating a duplicate,
    /// so whoever controls the address can always restart sign-up.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Username, email or password fails validation
    /// - Username or email already belongs to a verified account
    /// - The verification code could not be delivered (the account is
    ///   still persisted in that case)
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<Account> {
        validate_registration(&request.username, &request.password, &request.email)
            .map_err(|e| WhisperboxError::Validation(e.to_string()))?;

        let accounts = AccountRepository::new(self.db.pool());

        if accounts
            .get_verified_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(WhisperboxError::Conflict(
                "username already taken".to_string(),
            ));
        }

        // Hash and issue before touching the database, so a failure here
        // leaves no half-registered account behind
        let password_hash = hash_password(&request.password)
            .map_err(|e| WhisperboxError::Validation(e.to_string()))?;
        let issued = issue_code(self.code_ttl_secs);

        let account = match accounts.get_by_email(&request.email).await? {
            Some(existing) if existing.is_verified => {
                return Err(WhisperboxError::Conflict(
                    "email already registered".to_string(),
                ));
            }
            Some(existing) => {
                // Restart sign-up for the unfinished account: new password,
                // new code, fresh window, all in one update
                let update = AccountUpdate::new()
                    .password_hash(&password_hash)
                    .verification_code(&issued.code, &issued.expires_at);
                accounts
                    .update(existing.id, &update)
                    .await?
                    .ok_or_else(|| WhisperboxError::NotFound("account".to_string()))?
            }
            None => {
                accounts
                    .create(&NewAccount::new(
                        &request.username,
                        &request.email,
                        &password_hash,
                        &issued.code,
                        &issued.expires_at,
                    ))
                    .await?
            }
        };

        if let Err(e) = self
            .notifier
            .send_verification(&account.email, &account.username, &issued.code)
            .await
        {
            // The account stays; the caller hears that delivery failed and
            // can sign up again with the same email for a fresh code
            warn!(
                account_id = account.id,
                error = %e,
                "verification delivery failed after sign-up"
            );
            return Err(WhisperboxError::Notify(e.to_string()));
        }

        info!(
            account_id = account.id,
            username = %account.username,
            "account signed up, verification pending"
        );
        Ok(account)
    }

    /// Verify an account with the code sent at sign-up.
    ///
    /// When unverified accounts share the username, the code identifies
    /// which of them is verifying; the first to verify claims the handle
    /// and later attempts fail with a conflict.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No account is registered under the username
    /// - The verification window has expired (checked before the code)
    /// - The code does not match
    /// - A verified account already holds the username or email
    pub async fn verify_account(&self, username: &str, code: &str) -> Result<Account> {
        let accounts = AccountRepository::new(self.db.pool());

        let candidates = accounts.list_by_username(username).await?;
        if candidates.is_empty() {
            return Err(WhisperboxError::NotFound("account".to_string()));
        }

        // The supplied code picks out the signing-up account among
        // unverified duplicates; otherwise fall back to the holder
        let target = candidates
            .iter()
            .find(|a| !a.is_verified && a.verify_code == code)
            .unwrap_or(&candidates[0])
            .clone();

        match check_code(&target.verify_code, &target.verify_code_expires_at, code) {
            CodeCheck::Accepted => {
                let account = accounts
                    .update(target.id, &AccountUpdate::new().verified(true))
                    .await?
                    .ok_or_else(|| WhisperboxError::NotFound("account".to_string()))?;
                info!(
                    account_id = account.id,
                    username = %account.username,
                    "account verified"
                );
                Ok(account)
            }
            CodeCheck::Expired => Err(WhisperboxError::CodeExpired),
            CodeCheck::Incorrect => Err(WhisperboxError::CodeIncorrect),
        }
    }

    /// Authenticate a caller by username or email.
    ///
    /// Credential failures are deliberately uniform; only a correct
    /// password on an unverified account earns a more specific message.
    pub async fn authenticate(&self, identifier: &str, password: &str) -> Result<AuthenticatedCaller> {
        let accounts = AccountRepository::new(self.db.pool());

        let account = match accounts.get_by_username(identifier).await? {
            Some(account) => Some(account),
            None => accounts.get_by_email(identifier).await?,
        };
        let account =
            account.ok_or_else(|| WhisperboxError::Auth("invalid credentials".to_string()))?;

        let matches = verify_password(password, &account.password_hash)
            .map_err(|_| WhisperboxError::Auth("invalid credentials".to_string()))?;
        if !matches {
            return Err(WhisperboxError::Auth("invalid credentials".to_string()));
        }

        if !account.is_verified {
            return Err(WhisperboxError::Auth(
                "account not verified, check your email for the code".to_string(),
            ));
        }

        Ok(AuthenticatedCaller {
            account_id: account.id,
            username: account.username,
        })
    }

    /// Fetch the caller's own account.
    pub async fn get_account(&self, caller: &AuthenticatedCaller) -> Result<Account> {
        let accounts = AccountRepository::new(self.db.pool());
        accounts
            .get_by_id(caller.account_id)
            .await?
            .ok_or_else(|| WhisperboxError::NotFound("account".to_string()))
    }

    /// Open or close the caller's inbox to new messages.
    ///
    /// The gate only affects future sends; nothing already delivered is
    /// touched.
    pub async fn set_accepting(
        &self,
        caller: &AuthenticatedCaller,
        accepting: bool,
    ) -> Result<Account> {
        let accounts = AccountRepository::new(self.db.pool());
        let account = accounts
            .update(caller.account_id, &AccountUpdate::new().accepting(accepting))
            .await?
            .ok_or_else(|| WhisperboxError::NotFound("account".to_string()))?;

        info!(
            account_id = account.id,
            accepting = account.is_accepting_messages,
            "acceptance gate updated"
        );
        Ok(account)
    }

    /// Report whether the caller's inbox is open to new messages.
    pub async fn get_accepting(&self, caller: &AuthenticatedCaller) -> Result<bool> {
        let accounts = AccountRepository::new(self.db.pool());
        let account = accounts
            .get_by_id(caller.account_id)
            .await?
            .ok_or_else(|| WhisperboxError::NotFound("account".to_string()))?;
        Ok(account.is_accepting_messages)
    }

    /// Deliver an anonymous message to a username's inbox.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No account is registered under the username
    /// - The recipient's inbox is closed
    /// - The trimmed content is outside the 10-300 character range
    pub async fn send_message(&self, username: &str, content: &str) -> Result<Message> {
        let accounts = AccountRepository::new(self.db.pool());
        let account = accounts
            .get_by_username(username)
            .await?
            .ok_or_else(|| WhisperboxError::NotFound("account".to_string()))?;

        // The gate is consulted at send time only
        if !account.is_accepting_messages {
            return Err(WhisperboxError::Forbidden(
                "this inbox is not accepting messages".to_string(),
            ));
        }

        let content = content.trim();
        let length = content.chars().count();
        if length < MIN_CONTENT_LENGTH {
            return Err(WhisperboxError::Validation(format!(
                "message must be at least {MIN_CONTENT_LENGTH} characters"
            )));
        }
        if length > MAX_CONTENT_LENGTH {
            return Err(WhisperboxError::Validation(format!(
                "message must be at most {MAX_CONTENT_LENGTH} characters"
            )));
        }

        let messages = MessageRepository::new(self.db.pool());
        let message = messages
            .append(&NewMessage::new(account.id, content))
            .await?;

        info!(
            account_id = account.id,
            message_id = message.id,
            "anonymous message delivered"
        );
        Ok(message)
    }

    /// List the caller's messages, newest first.
    pub async fn list_messages(&self, caller: &AuthenticatedCaller) -> Result<Vec<Message>> {
        let messages = MessageRepository::new(self.db.pool());
        messages.list_descending(caller.account_id).await
    }

    /// Delete one of the caller's messages.
    ///
    /// Returns true if the message was deleted, false if it was already
    /// gone. Deleting twice is not an error.
    pub async fn delete_message(
        &self,
        caller: &AuthenticatedCaller,
        message_id: i64,
    ) -> Result<bool> {
        let messages = MessageRepository::new(self.db.pool());
        let deleted = messages.delete_by_id(caller.account_id, message_id).await?;
        if deleted {
            info!(
                account_id = caller.account_id,
                message_id, "message deleted"
            );
        }
        Ok(deleted)
    }

    /// Check whether a username is free to claim.
    ///
    /// Only verified accounts reserve a handle, so a name mid-sign-up
    /// still reads as available.
    pub async fn is_username_available(&self, username: &str) -> Result<bool> {
        validate_username(username).map_err(|e| WhisperboxError::Validation(e.to_string()))?;

        let accounts = AccountRepository::new(self.db.pool());
        Ok(accounts
            .get_verified_by_username(username)
            .await?
            .is_none())
    }
}
