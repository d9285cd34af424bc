//! Error type definitions
//!
//! Defines the error taxonomy shared by the cookie jar, the authenticators,
//! the request engine and the listing iterator.

use thiserror::Error;

/// Main error type for the session client
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network failure or non-2xx response
    #[error("Transport error on {path}{}: {message}", status_suffix(.status))]
    Transport {
        path: String,
        status: Option<u16>,
        message: String,
    },

    /// The authentication payload was missing or malformed
    #[error("Auth extraction failed: {field}")]
    AuthExtraction { field: String },

    /// A single `Set-Cookie` value could not be parsed
    #[error("Malformed cookie `{raw}`: {reason}")]
    MalformedCookie { raw: String, reason: String },

    /// A raw thing carried a different tag than the caller required
    #[error("Unexpected kind: expected {expected}, found {found}")]
    UnexpectedKind { expected: String, found: String },

    /// A listing gave up after too many consecutive failures
    #[error("Listing {path} aborted after {failures} consecutive failures: {last_error}")]
    ListingAborted {
        path: String,
        failures: u32,
        last_error: String,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML configuration parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a transport error for a request path
    pub fn transport(path: impl Into<String>, status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            path: path.into(),
            status,
            message: message.into(),
        }
    }

    /// Wrap a reqwest failure, keeping the path that was being fetched
    pub fn from_reqwest(path: impl Into<String>, err: reqwest::Error) -> Self {
        Self::Transport {
            path: path.into(),
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }

    /// Create an auth extraction error naming the missing field
    pub fn auth_extraction(field: impl Into<String>) -> Self {
        Self::AuthExtraction {
            field: field.into(),
        }
    }

    /// Create a malformed cookie error
    pub fn malformed_cookie(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedCookie {
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    /// Create an unexpected kind error
    pub fn unexpected_kind(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedKind {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a listing abort error from the failure that exhausted the budget
    pub fn listing_aborted(path: impl Into<String>, failures: u32, last_error: &Error) -> Self {
        Self::ListingAborted {
            path: path.into(),
            failures,
            last_error: last_error.to_string(),
        }
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status carried by a transport error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}
