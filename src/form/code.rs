//! Masked numeric code value.

use std::fmt;

/// Number of digits in a complete one-time password.
pub const OTP_LENGTH: usize = 6;

/// The code typed so far. Always matches `^[0-9]{0,6}$`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `candidate` may become the stored value.
    pub fn is_acceptable(candidate: &str) -> bool {
        candidate.len() <= OTP_LENGTH && candidate.bytes().all(|b| b.is_ascii_digit())
    }

    /// Replace the value with `candidate` if it is acceptable.
    ///
    /// Returns `false` and leaves the value untouched otherwise.
    pub fn accept(&mut self, candidate: &str) -> bool {
        if Self::is_acceptable(candidate) {
            self.0.clear();
            self.0.push_str(candidate);
            true
        } else {
            false
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.0.len() == OTP_LENGTH
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
