//! Internal data structures
//!
//! Credentials derived by the authentication handshake. They live for one
//! authenticated call and are never persisted.

use chrono::{DateTime, Utc};
use std::fmt;

/// Bearer token plus the tracking identifiers sent alongside it
#[derive(Clone, PartialEq)]
pub struct SessionCredentials {
    /// OAuth bearer token scraped from the HTML shell
    pub bearer_token: String,
    /// `loid.version.created.blob`
    pub loid: String,
    /// Session tracker value
    pub session_tracker: String,
    /// When the handshake completed
    pub minted_at: DateTime<Utc>,
}

impl SessionCredentials {
    pub fn new(
        bearer_token: impl Into<String>,
        loid: impl Into<String>,
        session_tracker: impl Into<String>,
    ) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            loid: loid.into(),
            session_tracker: session_tracker.into(),
            minted_at: Utc::now(),
        }
    }

    /// `Authorization` header value
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.bearer_token)
    }
}

impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("bearer_token", &redact(&self.bearer_token))
            .field("loid", &self.loid)
            .field("session_tracker", &self.session_tracker)
            .field("minted_at", &self.minted_at)
            .finish()
    }
}

/// Secrets shorter than this are logged by length only
const REDACT_MIN_LEN: usize = 12;

/// First few characters of a secret, for logs
pub fn redact(secret: &str) -> String {
    let len = secret.chars().count();
    if len < REDACT_MIN_LEN {
        return format!("…({} chars)", len);
    }
    let shown: String = secret.chars().take(4).collect();
    format!("{}…({} chars)", shown, len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header() {
        let creds = SessionCredentials::new("tok", "l.1.2.b", "st");
        assert_eq!(creds.authorization(), "Bearer tok");
    }

    #[test]
    fn test_debug_redacts_token() {
        let creds = SessionCredentials::new("supersecrettoken", "l.1.2.b", "st");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("supersecrettoken"));
        assert!(debug.contains("supe…(16 chars)"));
        assert!(debug.contains("l.1.2.b"));
    }

    #[test]
    fn test_short_secrets_show_length_only() {
        assert_eq!(redact("tok"), "…(3 chars)");
        assert_eq!(redact("abcdefghijk"), "…(11 chars)");
        assert_eq!(redact(""), "…(0 chars)");

        let debug = format!("{:?}", SessionCredentials::new("tok", "l.1.2.b", "st"));
        assert!(!debug.contains("tok"));
    }
}
