//! Authentication handshakes
//!
//! The OAuth dialect needs a bearer token and two tracking identifiers that
//! the site only hands out embedded in its logged-in HTML shell; the legacy
//! dialect needs a modhash from a small JSON endpoint. Both handshakes merge
//! the response's cookies only once extraction has succeeded, so a failed
//! handshake never leaves half-applied auth cookies in the jar.

use super::profiles::HeaderProfile;
use super::transport::{ensure_success, read_text, send_with_cookies};
use crate::cookies::{Cookie, CookieJar, Expiry, now_secs};
use crate::types::{SessionCredentials, internal::redact};
use crate::{Error, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

/// Fields pulled out of the embedded session JSON
#[derive(Debug, Clone, PartialEq)]
pub struct ShellSession {
    pub bearer_token: String,
    pub loid: String,
    pub session_tracker: String,
}

/// Scrapes the HTML shell for session credentials
#[derive(Debug, Clone)]
pub struct SessionAuthenticator {
    client: Client,
    base_url: Url,
    user_agent: String,
    cookie_ttl_secs: u64,
}

impl SessionAuthenticator {
    pub fn new(client: Client, base_url: Url, user_agent: impl Into<String>, cookie_ttl_secs: u64) -> Self {
        Self {
            client,
            base_url,
            user_agent: user_agent.into(),
            cookie_ttl_secs,
        }
    }

    /// Run the handshake against `context_path` and mint the `loid` and
    /// `session_tracker` cookies into `jar`.
    pub async fn authenticate(&self, jar: &RwLock<CookieJar>, context_path: &str) -> Result<SessionCredentials> {
        info!("Authenticating session via {}", context_path);

        let url = self.base_url.join(context_path)?;
        let builder = self
            .client
            .get(url)
            .headers(HeaderProfile::HtmlShell.headers(&self.user_agent)?);
        let received = send_with_cookies(jar, context_path, builder).await?;
        ensure_success(context_path, received.status)?;

        let html = read_text(context_path, received.response).await?;
        let shell = extract_shell_session(&html)?;
        let credentials = SessionCredentials::new(shell.bearer_token, shell.loid, shell.session_tracker);

        {
            let mut jar = jar.write().await;
            let now = now_secs();
            jar.apply_set_cookie_at(&received.set_cookies, now);

            let domain = jar.default_domain().to_string();
            let expires = Expiry::after(now, self.cookie_ttl_secs as f64);
            jar.set_cookie(Cookie::new("loid", &credentials.loid, &domain).with_expires(expires));
            jar.set_cookie(
                Cookie::new("session_tracker", &credentials.session_tracker, &domain).with_expires(expires),
            );
        }

        debug!(
            "Session authenticated, bearer {}",
            redact(&credentials.bearer_token)
        );
        Ok(credentials)
    }
}

/// Fetches the legacy anti-CSRF modhash
#[derive(Debug, Clone)]
pub struct LegacyAuthenticator {
    client: Client,
    base_url: Url,
    user_agent: String,
    modhash_path: String,
}

impl LegacyAuthenticator {
    pub fn new(
        client: Client,
        base_url: Url,
        user_agent: impl Into<String>,
        modhash_path: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url,
            user_agent: user_agent.into(),
            modhash_path: modhash_path.into(),
        }
    }

    pub async fn modhash(&self, jar: &RwLock<CookieJar>) -> Result<String> {
        let path = self.modhash_path.as_str();
        debug!("Fetching modhash from {}", path);

        let url = self.base_url.join(path)?;
        let builder = self
            .client
            .get(url)
            .headers(HeaderProfile::JsonDocument.headers(&self.user_agent)?);
        let received = send_with_cookies(jar, path, builder).await?;
        ensure_success(path, received.status)?;

        let body = read_text(path, received.response).await?;
        let modhash = extract_modhash(&body)?;

        jar.write().await.apply_set_cookie(&received.set_cookies);
        Ok(modhash)
    }
}

/// Pull the session credentials out of the HTML shell's `#data` element.
///
/// The element holds a script assignment wrapping one JSON document; the
/// document is taken from the first `{` to the last `}`.
pub fn extract_shell_session(html: &str) -> Result<ShellSession> {
    let json = {
        let document = Html::parse_document(html);
        let selector = Selector::parse("#data").map_err(|e| Error::internal(format!("bad selector: {}", e)))?;
        let element = document
            .select(&selector)
            .next()
            .ok_or_else(|| Error::auth_extraction("#data element"))?;
        let text: String = element.text().collect();

        match (text.find('{'), text.rfind('}')) {
            (Some(start), Some(end)) if start < end => text[start..=end].to_string(),
            _ => return Err(Error::auth_extraction("#data JSON document")),
        }
    };

    let value: Value =
        serde_json::from_str(&json).map_err(|e| Error::auth_extraction(format!("#data JSON document: {}", e)))?;

    let field = |pointer: &str, name: &str| {
        value
            .pointer(pointer)
            .and_then(scalar_to_string)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::auth_extraction(name))
    };

    let loid = [
        field("/user/loid/loid", "user.loid.loid")?,
        field("/user/loid/version", "user.loid.version")?,
        field("/user/loid/created", "user.loid.created")?,
        field("/user/loid/blob", "user.loid.blob")?,
    ]
    .join(".");

    Ok(ShellSession {
        bearer_token: field("/user/session/accessToken", "user.session.accessToken")?,
        loid,
        session_tracker: field("/user/sessionTracker", "user.sessionTracker")?,
    })
}

/// `data.modhash` of the `me.json` document
pub fn extract_modhash(body: &str) -> Result<String> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| Error::auth_extraction(format!("modhash document: {}", e)))?;
    value
        .pointer("/data/modhash")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::auth_extraction("data.modhash"))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
