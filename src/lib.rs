//! whisperbox - Anonymous Message Mailbox
//!
//! A small service where people claim a username, verify it by email,
//! and collect anonymous messages from anyone who has their link.

pub mod auth;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod logging;
pub mod mailbox;
pub mod notify;
pub mod service;
pub mod verification;
pub mod web;

pub use auth::{
    hash_password, is_reserved_username, validate_email, validate_password, validate_registration,
    validate_username, verify_password, PasswordError, ValidationError, MAX_PASSWORD_LENGTH,
    MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH,
};
pub use config::Config;
pub use db::{Account, AccountRepository, AccountUpdate, Database, NewAccount};
pub use error::{Result, WhisperboxError};
pub use mailbox::{Message, MessageRepository, NewMessage, MAX_CONTENT_LENGTH, MIN_CONTENT_LENGTH};
pub use notify::{build_notifier, LogNotifier, Notifier, NotifyError, WebhookNotifier};
pub use service::{AuthenticatedCaller, MailboxService, SignUpRequest};
pub use verification::{check_code, issue_code, CodeCheck, IssuedCode, CODE_MAX, CODE_MIN};
pub use web::WebServer;
