//! Request DTOs for Web API.

use serde::Deserialize;
use validator::Validate;

/// Account registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username.
    #[validate(length(min = 2, max = 20, message = "Username must be 2-20 characters"))]
    pub username: String,
    /// Email address the verification code is sent to.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Account verification request.
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyRequest {
    /// Username being verified.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Six-digit verification code.
    #[validate(length(equal = 6, message = "Code must be 6 digits"))]
    pub code: String,
}

/// Login request.
///
/// The identifier may be a username or an email address. No field rules
/// here: login failures stay uniform.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username or email.
    pub identifier: String,
    /// Password.
    pub password: String,
}

/// Anonymous message send request.
///
/// Length bounds are enforced by the service after trimming, not here.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    /// Message content.
    pub content: String,
}

/// Acceptance gate update request.
#[derive(Debug, Deserialize)]
pub struct AcceptanceRequest {
    /// Whether the inbox accepts new messages.
    pub accepting: bool,
}

/// Query parameters for the username availability check.
#[derive(Debug, Deserialize)]
pub struct UsernameCheckQuery {
    /// Username to check.
    pub username: String,
}
