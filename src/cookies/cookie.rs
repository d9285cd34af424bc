//! Cookie record
//!
//! One entry of the jar, shaped like the records browsers export so that a
//! saved login can be loaded without re-authenticating.

use crate::types::serde_helpers::{deserialize_flag, deserialize_flexible_bool, expiry};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Current time in fractional epoch seconds, the unit cookie expiry is stored in
pub fn now_secs() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

/// When a cookie stops being sent
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Expiry {
    /// Lives for the session; never pruned by time
    #[default]
    Session,
    /// Absolute expiry in epoch seconds
    At(f64),
}

impl Expiry {
    /// Expiry `secs` seconds after `now`
    pub fn after(now: f64, secs: f64) -> Self {
        Self::At(now + secs)
    }

    /// Whether the cookie is stale at `now`
    pub fn is_expired(&self, now: f64) -> bool {
        match self {
            Self::Session => false,
            Self::At(at) => *at <= now,
        }
    }
}

/// A cookie as held by the jar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default, with = "expiry")]
    pub expires: Expiry,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub secure: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_flexible_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub http_only: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub partitioned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub same_party: bool,
    /// Exporter-specific fields (`size`, `sourcePort` …) carried through save/load untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_path() -> String {
    "/".to_string()
}

impl Cookie {
    /// Session cookie with site defaults; `secure` follows the `__Secure-`/`__Host-` prefix
    pub fn new(name: impl Into<String>, value: impl Into<String>, domain: impl Into<String>) -> Self {
        let name = name.into();
        let secure = name.starts_with("__Secure-") || name.starts_with("__Host-");
        Self {
            name,
            value: value.into(),
            domain: domain.into(),
            path: default_path(),
            expires: Expiry::Session,
            secure,
            http_only: None,
            partitioned: false,
            same_site: None,
            same_party: false,
            extra: Map::new(),
        }
    }

    pub fn with_expires(mut self, expires: Expiry) -> Self {
        self.expires = expires;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn is_session(&self) -> bool {
        self.expires == Expiry::Session
    }

    pub fn is_expired(&self, now: f64) -> bool {
        self.expires.is_expired(now)
    }

    /// `name=value` as sent in the `Cookie` request header
    pub fn pair(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_new_cookie_defaults() {
        let cookie = Cookie::new("token_v2", "abc", ".reddit.com");
        assert_eq!(cookie.path, "/");
        assert!(cookie.is_session());
        assert!(!cookie.secure);
        assert_eq!(cookie.pair(), "token_v2=abc");
    }

    #[test]
    fn test_prefixed_names_are_secure() {
        assert!(Cookie::new("__Secure-next-auth", "x", ".reddit.com").secure);
        assert!(Cookie::new("__Host-csrf", "x", ".reddit.com").secure);
        assert!(!Cookie::new("Secure-ish", "x", ".reddit.com").secure);
    }

    #[test]
    fn test_expiry_boundary() {
        let cookie = Cookie::new("a", "b", ".reddit.com").with_expires(Expiry::At(100.0));
        assert!(!cookie.is_expired(99.9));
        assert!(cookie.is_expired(100.0));
        assert!(!Cookie::new("a", "b", ".reddit.com").is_expired(f64::MAX));
    }

    #[test]
    fn test_browser_export_record() {
        let record = json!({
            "name": "reddit_session",
            "value": "xyz",
            "domain": ".reddit.com",
            "path": "/",
            "expires": 1893456000,
            "size": 17,
            "httpOnly": true,
            "secure": true,
            "session": false,
            "sameParty": false,
            "sourceScheme": "Secure",
            "sourcePort": 443
        });

        let cookie: Cookie = serde_json::from_value(record).unwrap();
        assert_eq!(cookie.expires, Expiry::At(1893456000.0));
        assert_eq!(cookie.http_only, Some(true));
        assert!(cookie.secure);
        assert_eq!(cookie.extra.get("sourcePort"), Some(&json!(443)));

        let saved = serde_json::to_value(&cookie).unwrap();
        assert_eq!(saved["sourceScheme"], "Secure");
        assert_eq!(saved["expires"], json!(1893456000.0));
    }

    #[test]
    fn test_minimal_record() {
        let cookie: Cookie = serde_json::from_value(json!({"name": "loid", "value": "1"})).unwrap();
        assert_eq!(cookie.path, "/");
        assert!(cookie.is_session());
        assert!(cookie.extra.is_empty());
    }
}
