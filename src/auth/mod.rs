//! Authentication module for whisperbox.
//!
//! This module provides password hashing and input validation for
//! registration and login.

mod password;
pub mod validation;

pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use validation::{
    is_reserved_username, validate_email, validate_registration, validate_username,
    ValidationError, MAX_USERNAME_LENGTH, MIN_USERNAME_LENGTH,
};
