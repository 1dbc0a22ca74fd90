//! Password digest value object.
//!
//! Clients hash credentials with SHA-256 before they reach the API. The
//! server only checks the shape of what it receives and stores it as is.

use once_cell::sync::Lazy;
use regex::Regex;
use subtle::ConstantTimeEq;

use crate::errors::{AppError, AppResult};

static DIGEST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{64}$").expect("digest pattern is a valid regex")
});

/// Hex encoded SHA-256 digest of a user credential.
///
/// Always 64 lowercase hex characters once constructed through [`PasswordDigest::parse`].
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    digest: String,
}

// Don't expose the digest in debug output
impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("digest", &"[REDACTED]")
            .finish()
    }
}

impl PasswordDigest {
    /// Validate client input.
    ///
    /// # Errors
    /// Returns `InvalidPasswordFormat` unless the input is exactly 64
    /// lowercase hex characters.
    pub fn parse(input: &str) -> AppResult<Self> {
        if !Self::is_valid(input) {
            return Err(AppError::InvalidPasswordFormat);
        }

        Ok(Self {
            digest: input.to_string(),
        })
    }

    /// Wrap a digest loaded from the database.
    pub fn from_stored(digest: String) -> Self {
        Self { digest }
    }

    /// Whether `input` has the shape of a SHA-256 hex digest.
    pub fn is_valid(input: &str) -> bool {
        DIGEST_PATTERN.is_match(input)
    }

    pub fn as_str(&self) -> &str {
        &self.digest
    }

    pub fn into_string(self) -> String {
        self.digest
    }

    /// Compare against a submitted digest in constant time.
    pub fn matches(&self, candidate: &str) -> bool {
        self.digest.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl From<PasswordDigest> for String {
    fn from(password: PasswordDigest) -> Self {
        password.digest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST: &str = "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";

    #[test]
    fn test_accepts_lowercase_sha256_hex() {
        let digest = PasswordDigest::parse(DIGEST).unwrap();
        assert_eq!(digest.as_str(), DIGEST);
    }

    #[test]
    fn test_rejects_plain_text() {
        let result = PasswordDigest::parse("this is not a password hash");
        assert!(matches!(result, Err(AppError::InvalidPasswordFormat)));
    }

    #[test]
    fn test_rejects_uppercase_hex() {
        let upper = DIGEST.to_uppercase();
        assert!(PasswordDigest::parse(&upper).is_err());
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(PasswordDigest::parse(&DIGEST[..63]).is_err());
        assert!(PasswordDigest::parse(&format!("{}0", DIGEST)).is_err());
        assert!(PasswordDigest::parse("").is_err());
    }

    #[test]
    fn test_rejects_trailing_newline() {
        assert!(PasswordDigest::parse(&format!("{}\n", DIGEST)).is_err());
    }

    #[test]
    fn test_matches() {
        let stored = PasswordDigest::from_stored(DIGEST.to_string());
        assert!(stored.matches(DIGEST));
        assert!(!stored.matches(&DIGEST.replace('5', "6")));
        assert!(!stored.matches(""));
    }

    #[test]
    fn test_debug_is_redacted() {
        let digest = PasswordDigest::parse(DIGEST).unwrap();
        assert!(!format!("{:?}", digest).contains(DIGEST));
    }
}
