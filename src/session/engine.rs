//! # Request engine
//!
//! [`Session`] owns one identity's cookie jar and issues every request in one
//! of three dialects:
//!
//! - [`fetch_json`](Session::fetch_json): public GET on the web host
//! - [`fetch_oauth`](Session::fetch_oauth): bearer-authenticated POST on the OAuth host
//! - [`fetch_legacy_form`](Session::fetch_legacy_form): modhash form POST on the web host
//!
//! Authenticated dialects re-run their handshake on every call; credentials
//! are never cached across calls. Response cookies are merged into the jar
//! as one atomic step after each response arrives.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use reddit_web_session::{Session, Settings};
//! use reddit_web_session::types::{Params, ResponseFormat};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let session = Arc::new(Session::from_cookie_file(Settings::default(), "cookies.json".as_ref())?);
//! let me = session
//!     .fetch_json("/api/me.json", &Params::new(), ResponseFormat::Json)
//!     .await?;
//! println!("{:?}", me);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # });
//! ```

use super::authenticator::{LegacyAuthenticator, SessionAuthenticator};
use super::profiles::{HeaderProfile, X_REDDIT_LOID, X_REDDIT_SESSION};
use super::transport::{decode, ensure_success, send_with_cookies};
use crate::config::Settings;
use crate::cookies::{Cookie, CookieJar, CookieProvider};
use crate::types::{Params, Payload, ResponseFormat};
use crate::{Error, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

/// Form field the legacy dialect carries its modhash in
pub const MODHASH_FIELD: &str = "uh";

/// One authenticated identity and its request dialects
#[derive(Debug)]
pub struct Session {
    /// Configuration settings
    settings: Arc<Settings>,
    /// HTTP client; cookies are managed by the jar, not by reqwest
    http_client: Client,
    /// Cookie jar; every read and write goes through this lock
    jar: RwLock<CookieJar>,
    base_url: Url,
    oauth_url: Url,
    authenticator: SessionAuthenticator,
    legacy_authenticator: LegacyAuthenticator,
}

impl Session {
    /// Create a session from settings and an initial cookie set
    pub fn new(settings: Settings, cookies: impl IntoIterator<Item = Cookie>) -> Result<Self> {
        let jar = CookieJar::from_cookies(settings.site.cookie_domain.clone(), cookies);
        Self::with_jar(settings, jar)
    }

    /// Create a session around an existing jar
    pub fn with_jar(settings: Settings, jar: CookieJar) -> Result<Self> {
        settings.validate()?;

        let http_client = Client::builder()
            .timeout(settings.site.timeout())
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = Url::parse(&settings.site.base_url)?;
        let oauth_url = Url::parse(&settings.site.oauth_url)?;

        let authenticator = SessionAuthenticator::new(
            http_client.clone(),
            base_url.clone(),
            settings.site.user_agent.clone(),
            settings.auth.minted_cookie_ttl_secs,
        );
        let legacy_authenticator = LegacyAuthenticator::new(
            http_client.clone(),
            base_url.clone(),
            settings.site.user_agent.clone(),
            settings.auth.modhash_path.clone(),
        );

        debug!("Session created with {} cookies", jar.len());

        Ok(Self {
            settings: Arc::new(settings),
            http_client,
            jar: RwLock::new(jar),
            base_url,
            oauth_url,
            authenticator,
            legacy_authenticator,
        })
    }

    /// Create a session from whatever produced the logged-in cookie set
    pub async fn from_provider(settings: Settings, provider: &dyn CookieProvider) -> Result<Self> {
        let cookies = provider.initial_cookies().await?;
        Self::new(settings, cookies)
    }

    /// Create a session from a saved cookie file
    pub fn from_cookie_file(settings: Settings, path: &Path) -> Result<Self> {
        let jar = CookieJar::load(path, settings.site.cookie_domain.clone())?;
        Self::with_jar(settings, jar)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Snapshot of the jar's current cookies
    pub async fn cookies(&self) -> Vec<Cookie> {
        self.jar.read().await.cookies().to_vec()
    }

    pub async fn cookie(&self, name: &str) -> Option<Cookie> {
        self.jar.read().await.get(name).cloned()
    }

    /// Programmatic upsert with the jar's delete-on-empty-value rule
    pub async fn set_cookie(&self, cookie: Cookie) {
        self.jar.write().await.set_cookie(cookie);
    }

    /// The `Cookie` header the next request would carry
    pub async fn cookie_header(&self) -> String {
        self.jar.write().await.prepare_header()
    }

    /// Persist the jar as a JSON array
    pub async fn save_cookies(&self, path: &Path) -> Result<()> {
        let (json, count) = {
            let jar = self.jar.read().await;
            (jar.to_json()?, jar.len())
        };
        tokio::fs::write(path, json).await?;
        debug!("Saved {} cookies to {:?}", count, path);
        Ok(())
    }

    /// Public GET against the web host
    pub async fn fetch_json(&self, path: &str, query: &Params, format: ResponseFormat) -> Result<Payload> {
        let url = self.base_url.join(path)?;
        let builder = self
            .http_client
            .get(url)
            .query(query)
            .headers(HeaderProfile::Document.headers(&self.settings.site.user_agent)?);
        self.execute(path, builder, format).await
    }

    /// Bearer-authenticated form POST against the OAuth host.
    ///
    /// The handshake scrapes `context_path` (the configured default when
    /// `None`); a failed handshake is returned as-is and nothing is posted.
    pub async fn fetch_oauth(
        &self,
        path: &str,
        form: &Params,
        context_path: Option<&str>,
        format: ResponseFormat,
    ) -> Result<Payload> {
        let context_path = context_path.unwrap_or(self.settings.auth.context_path.as_str());
        let credentials = self.authenticator.authenticate(&self.jar, context_path).await?;

        let url = self.oauth_url.join(path)?;
        let builder = self
            .http_client
            .post(url)
            .headers(HeaderProfile::OAuthApi.headers(&self.settings.site.user_agent)?)
            .header(X_REDDIT_LOID, credentials.loid.as_str())
            .header(X_REDDIT_SESSION, credentials.session_tracker.as_str())
            .header(AUTHORIZATION, credentials.authorization())
            .body(form.encode());
        self.execute(path, builder, format).await
    }

    /// Modhash-authenticated form POST against the web host
    pub async fn fetch_legacy_form(&self, path: &str, form: &Params, format: ResponseFormat) -> Result<Payload> {
        let modhash = self.legacy_authenticator.modhash(&self.jar).await?;
        let form = form.clone().with(MODHASH_FIELD, modhash);

        let url = self.base_url.join(path)?;
        let builder = self
            .http_client
            .post(url)
            .headers(HeaderProfile::LegacyXhr.headers(&self.settings.site.user_agent)?)
            .body(form.encode());
        self.execute(path, builder, format).await
    }

    /// Send, merge response cookies, then check status and decode
    async fn execute(&self, path: &str, builder: RequestBuilder, format: ResponseFormat) -> Result<Payload> {
        let received = send_with_cookies(&self.jar, path, builder).await?;

        if !received.set_cookies.is_empty() {
            let applied = self.jar.write().await.apply_set_cookie(&received.set_cookies);
            debug!("Merged {} cookies from {}", applied, path);
        }

        ensure_success(path, received.status)?;
        decode(path, received.response, format).await
    }
}
