//! Input validation for whisperbox registration.
//!
//! This module provides validation functions for usernames, passwords,
//! and email addresses.

use thiserror::Error;

/// Minimum username length.
pub const MIN_USERNAME_LENGTH: usize = 2;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 20;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum email length.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Username is too short.
    #[error("username must be at least {MIN_USERNAME_LENGTH} characters")]
    UsernameTooShort,

    /// Username is too long.
    #[error("username must be at most {MAX_USERNAME_LENGTH} characters")]
    UsernameTooLong,

    /// Username contains invalid characters.
    #[error("username can only contain alphanumeric characters and underscores")]
    UsernameInvalidChars,

    /// Username is reserved.
    #[error("this username is reserved")]
    UsernameReserved,

    /// Password is too short.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    PasswordTooLong,

    /// Password is the same as username.
    #[error("password cannot be the same as username")]
    PasswordSameAsUsername,

    /// Email is missing.
    #[error("email is required")]
    EmailEmpty,

    /// Email is too long.
    #[error("email must be at most {MAX_EMAIL_LENGTH} characters")]
    EmailTooLong,

    /// Email format is invalid.
    #[error("invalid email format")]
    EmailInvalidFormat,
}

/// Reserved usernames that cannot be registered.
///
/// Handles double as public inbox URLs, so names that look official or
/// collide with routes stay off the table.
const RESERVED_USERNAMES: &[&str] = &[
    "admin",
    "administrator",
    "moderator",
    "operator",
    "root",
    "system",
    "anonymous",
    "support",
    "help",
    "info",
    "test",
    "demo",
    "null",
    "undefined",
    "api",
    "whisperbox",
];

/// Check if a username is reserved.
pub fn is_reserved_username(username: &str) -> bool {
    let lower = username.to_lowercase();
    RESERVED_USERNAMES.iter().any(|&r| r == lower)
}

/// Validate a username.
///
/// Requirements:
/// - Length: 2-20 characters
/// - Characters: alphanumeric (a-z, A-Z, 0-9) and underscore (_)
/// - Not a reserved username
///
/// # Examples
///
/// ```
/// use whisperbox::auth::validation::validate_username;
///
/// assert!(validate_username("john_doe").is_ok());
/// assert!(validate_username("j").is_err()); // too short
/// assert!(validate_username("admin").is_err()); // reserved
/// ```
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    // Check length
    if username.len() < MIN_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooShort);
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }

    // Check characters: must be alphanumeric or underscore
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ValidationError::UsernameInvalidChars);
    }

    // Check reserved usernames
    if is_reserved_username(username) {
        return Err(ValidationError::UsernameReserved);
    }

    Ok(())
}

/// Validate a password at registration time.
///
/// Requirements:
/// - Length: 8-128 characters
/// - Must not be the same as the username (if provided)
///
/// # Examples
///
/// ```
/// use whisperbox::auth::validation::validate_registration_password;
///
/// assert!(validate_registration_password("secure_pass123", Some("john")).is_ok());
/// assert!(validate_registration_password("short", None).is_err()); // too short
/// ```
pub fn validate_registration_password(
    password: &str,
    username: Option<&str>,
) -> Result<(), ValidationError> {
    // Check length
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooLong);
    }

    // Check if same as username
    if let Some(user) = username {
        if password.eq_ignore_ascii_case(user) {
            return Err(ValidationError::PasswordSameAsUsername);
        }
    }

    Ok(())
}

/// Validate an email address.
///
/// Email is required: verification codes have nowhere else to go.
/// Beyond that, performs basic format validation only.
///
/// # Examples
///
/// ```
/// use whisperbox::auth::validation::validate_email;
///
/// assert!(validate_email("user@example.com").is_ok());
/// assert!(validate_email("").is_err()); // required
/// assert!(validate_email("invalid").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailEmpty);
    }

    // Check length
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::EmailTooLong);
    }

    // Basic format check: must contain @ and have text before and after
    // This is intentionally simple - we don't try to fully validate email format
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ValidationError::EmailInvalidFormat);
    }

    let (local, domain) = (parts[0], parts[1]);

    // Local part must not be empty
    if local.is_empty() {
        return Err(ValidationError::EmailInvalidFormat);
    }

    // Domain must contain at least one dot and not be empty on either side
    if !domain.contains('.') {
        return Err(ValidationError::EmailInvalidFormat);
    }

    let domain_parts: Vec<&str> = domain.split('.').collect();
    if domain_parts.iter().any(|p| p.is_empty()) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    // No whitespace allowed
    if email.chars().any(|c| c.is_whitespace()) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    Ok(())
}

/// Validate all registration fields at once.
///
/// Returns the first validation error encountered, or Ok if all fields are valid.
pub fn validate_registration(
    username: &str,
    password: &str,
    email: &str,
) -> Result<(), ValidationError> {
    validate_username(username)?;
    validate_registration_password(password, Some(username))?;
    validate_email(email)?;
    Ok(())
}
