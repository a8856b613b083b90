//! Secret handling for the connector credential
//!
//! The API key travels from the host's settings map into HTTP headers and
//! nowhere else. Wrapping it in `SecretString` keeps it out of `Debug` and
//! `Display` output, so tracing a config or client struct never leaks it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A wrapper type for sensitive strings like API keys
#[derive(Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    /// Create a new secret string
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Get the actual value (use with caution)
    pub fn expose_secret(&self) -> &str {
        &self.value
    }

    /// Check if the secret is empty
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get a partially redacted version for diagnostics
    pub fn partial_redact(&self) -> String {
        if self.value.is_empty() {
            return "[EMPTY]".to_string();
        }

        let len = self.value.len();
        if len <= 8 {
            // Very short secrets get fully redacted
            "[REDACTED]".to_string()
        } else if self.value.starts_with("AIza") {
            // Google API keys carry a fixed prefix
            format!("{}...{}", &self.value[..4], &self.value[len - 4..])
        } else {
            format!(
                "{}...{}",
                &self.value[..2.min(len)],
                &self.value[len.saturating_sub(2)..]
            )
        }
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_redact() {
        let secret = SecretString::new("AIzaSyB1234567890abcdef");
        assert_eq!(format!("{:?}", secret), "[REDACTED]");
        assert_eq!(format!("{}", secret), "[REDACTED]");
    }

    #[test]
    fn test_partial_redact_google_key() {
        let secret = SecretString::new("AIzaSyB1234567890abcdef");
        assert_eq!(secret.partial_redact(), "AIza...cdef");
    }

    #[test]
    fn test_partial_redact_short_secret() {
        let secret = SecretString::new("abc123");
        assert_eq!(secret.partial_redact(), "[REDACTED]");
    }

    #[test]
    fn test_partial_redact_empty() {
        let secret = SecretString::new("");
        assert_eq!(secret.partial_redact(), "[EMPTY]");
        assert!(secret.is_empty());
    }

    #[test]
    fn test_expose_secret() {
        let secret = SecretString::from("token-value");
        assert_eq!(secret.expose_secret(), "token-value");
    }

    #[test]
    fn test_serde_transparent() {
        let secret: SecretString = serde_json::from_str("\"my-key\"").unwrap();
        assert_eq!(secret.expose_secret(), "my-key");
        assert_eq!(serde_json::to_string(&secret).unwrap(), "\"my-key\"");
    }
}
