//! Email verification codes.
//!
//! Codes are six decimal digits with a limited lifetime. Checking a
//! supplied code reports expiry before correctness, so a caller holding
//! the right code for a dead window is told to request a fresh one rather
//! than being strung along.

use rand::Rng;

use crate::datetime;

/// Smallest issuable code value.
pub const CODE_MIN: u32 = 100_000;

/// Largest issuable code value.
pub const CODE_MAX: u32 = 999_999;

/// A freshly issued verification code with its expiry timestamp.
#[derive(Debug, Clone)]
pub struct IssuedCode {
    /// Six decimal digits
    pub code: String,
    /// Expiry timestamp in database format
    pub expires_at: String,
}

/// Issue a new random verification code valid for `ttl_secs` seconds.
pub fn issue_code(ttl_secs: i64) -> IssuedCode {
    let code = rand::rng().random_range(CODE_MIN..=CODE_MAX);
    IssuedCode {
        code: code.to_string(),
        expires_at: datetime::timestamp_after_secs(ttl_secs),
    }
}

/// Outcome of checking a supplied code against the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeCheck {
    /// Code matched inside its window
    Accepted,
    /// The window has closed; the supplied value was not examined
    Expired,
    /// In-window, wrong value
    Incorrect,
}

/// Check a supplied code against the stored code and its expiry.
///
/// Expiry wins: once the window has closed the supplied value is not
/// compared at all. An unparseable expiry timestamp counts as expired.
pub fn check_code(stored: &str, expires_at: &str, supplied: &str) -> CodeCheck {
    let Some(expiry) = datetime::parse_timestamp(expires_at) else {
        return CodeCheck::Expired;
    };
    if chrono::Utc::now() > expiry {
        return CodeCheck::Expired;
    }
    if stored == supplied {
        CodeCheck::Accepted
    } else {
        CodeCheck::Incorrect
    }
}
