//! Fixed request header profiles
//!
//! Each dialect presents itself with the exact header set the site's own
//! Firefox web client sends. The values are opaque constants; changing them
//! risks tripping server-side bot detection.

use crate::{Error, Result};
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, UPGRADE_INSECURE_REQUESTS,
    USER_AGENT,
};

const SEC_FETCH_DEST: HeaderName = HeaderName::from_static("sec-fetch-dest");
const SEC_FETCH_MODE: HeaderName = HeaderName::from_static("sec-fetch-mode");
const SEC_FETCH_SITE: HeaderName = HeaderName::from_static("sec-fetch-site");
const SEC_FETCH_USER: HeaderName = HeaderName::from_static("sec-fetch-user");
const X_REQUESTED_WITH: HeaderName = HeaderName::from_static("x-requested-with");

/// Header `x-reddit-loid` on OAuth calls
pub const X_REDDIT_LOID: HeaderName = HeaderName::from_static("x-reddit-loid");
/// Header `x-reddit-session` on OAuth calls
pub const X_REDDIT_SESSION: HeaderName = HeaderName::from_static("x-reddit-session");

/// Which browser request the outgoing call imitates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderProfile {
    /// Top-level navigation accepting anything (public JSON GETs)
    Document,
    /// Top-level navigation to the HTML shell (session handshake)
    HtmlShell,
    /// Top-level navigation to a JSON document (modhash handshake)
    JsonDocument,
    /// Cross-site fetch to the OAuth host
    OAuthApi,
    /// Same-origin XHR form post
    LegacyXhr,
}

impl HeaderProfile {
    /// Materialise the profile with the configured user agent
    pub fn headers(self, user_agent: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|e| Error::config(format!("Invalid user agent: {}", e)))?,
        );

        match self {
            Self::Document | Self::HtmlShell | Self::JsonDocument => {
                let accept = match self {
                    Self::HtmlShell => "text/html",
                    Self::JsonDocument => "application/json",
                    _ => "*/*",
                };
                headers.insert(ACCEPT, HeaderValue::from_static(accept));
                headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
                headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
                headers.insert(SEC_FETCH_DEST, HeaderValue::from_static("document"));
                headers.insert(SEC_FETCH_MODE, HeaderValue::from_static("navigate"));
                headers.insert(SEC_FETCH_SITE, HeaderValue::from_static("none"));
                headers.insert(SEC_FETCH_USER, HeaderValue::from_static("?1"));
            }
            Self::OAuthApi => {
                headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
                headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
                headers.insert(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                );
                headers.insert(SEC_FETCH_DEST, HeaderValue::from_static("empty"));
                headers.insert(SEC_FETCH_MODE, HeaderValue::from_static("cors"));
                headers.insert(SEC_FETCH_SITE, HeaderValue::from_static("same-site"));
            }
            Self::LegacyXhr => {
                headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
                headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
                headers.insert(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
                );
                headers.insert(X_REQUESTED_WITH, HeaderValue::from_static("XMLHttpRequest"));
                headers.insert(SEC_FETCH_DEST, HeaderValue::from_static("empty"));
                headers.insert(SEC_FETCH_MODE, HeaderValue::from_static("cors"));
                headers.insert(SEC_FETCH_SITE, HeaderValue::from_static("same-origin"));
            }
        }

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::DEFAULT_USER_AGENT;
    use rstest::rstest;

    #[rstest]
    #[case(HeaderProfile::Document, "*/*")]
    #[case(HeaderProfile::HtmlShell, "text/html")]
    #[case(HeaderProfile::JsonDocument, "application/json")]
    fn test_navigation_profiles(#[case] profile: HeaderProfile, #[case] accept: &str) {
        let headers = profile.headers(DEFAULT_USER_AGENT).unwrap();
        assert_eq!(headers[ACCEPT], accept);
        assert_eq!(headers["sec-fetch-dest"], "document");
        assert_eq!(headers["sec-fetch-mode"], "navigate");
        assert_eq!(headers["sec-fetch-site"], "none");
        assert_eq!(headers["sec-fetch-user"], "?1");
        assert_eq!(headers[UPGRADE_INSECURE_REQUESTS], "1");
        assert_eq!(headers[USER_AGENT], DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_oauth_profile() {
        let headers = HeaderProfile::OAuthApi.headers(DEFAULT_USER_AGENT).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "application/x-www-form-urlencoded");
        assert_eq!(headers["sec-fetch-site"], "same-site");
        assert!(!headers.contains_key("sec-fetch-user"));
    }

    #[test]
    fn test_legacy_profile() {
        let headers = HeaderProfile::LegacyXhr.headers(DEFAULT_USER_AGENT).unwrap();
        assert_eq!(
            headers[CONTENT_TYPE],
            "application/x-www-form-urlencoded; charset=UTF-8"
        );
        assert_eq!(headers["x-requested-with"], "XMLHttpRequest");
        assert_eq!(headers["sec-fetch-site"], "same-origin");
    }

    #[test]
    fn test_invalid_user_agent() {
        assert!(matches!(
            HeaderProfile::Document.headers("bad\nagent"),
            Err(Error::Config(_))
        ));
    }
}
