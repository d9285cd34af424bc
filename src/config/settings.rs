//! Configuration settings structure
//!
//! Defines the main settings structure and loading logic for the session client.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Firefox user agent the site's web client is emulated with
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/114.0";

/// Lifetime of the `loid` and `session_tracker` cookies minted by the handshake (400 days)
pub const MINTED_COOKIE_TTL_SECS: u64 = 34_560_000;

/// Main configuration settings for the session client
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Site hosts and request identity
    pub site: SiteSettings,
    /// Authentication handshake configuration
    pub auth: AuthSettings,
    /// Listing iteration configuration
    pub listing: ListingSettings,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Hosts and client identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Main web host, used by public GETs and the legacy form dialect
    pub base_url: String,
    /// OAuth API host
    pub oauth_url: String,
    /// Domain assigned to cookies that do not name one
    pub cookie_domain: String,
    /// User agent sent with every request
    pub user_agent: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Authentication handshake configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Page scraped for the embedded session JSON when no context path is given
    pub context_path: String,
    /// JSON endpoint carrying the legacy modhash
    pub modhash_path: String,
    /// Lifetime of minted session cookies in seconds
    pub minted_cookie_ttl_secs: u64,
}

/// Listing iteration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSettings {
    /// Consecutive fetch failures tolerated before a listing aborts
    pub max_consecutive_failures: u32,
    /// Pause between retries of a failed page or "more" fetch, in milliseconds
    pub retry_delay_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level
    pub level: String,
    /// Enable verbose logging
    pub verbose: bool,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.reddit.com".to_string(),
            oauth_url: "https://oauth.reddit.com".to_string(),
            cookie_domain: ".reddit.com".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            context_path: "/".to_string(),
            modhash_path: "/api/me.json".to_string(),
            minted_cookie_ttl_secs: MINTED_COOKIE_TTL_SECS,
        }
    }
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            max_consecutive_failures: 3,
            retry_delay_ms: 500,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            verbose: false,
        }
    }
}

impl SiteSettings {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ListingSettings {
    /// Retry delay as a [`Duration`]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Point both hosts at one origin (mock servers, proxies)
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        let origin = origin.into();
        self.site.base_url = origin.clone();
        self.site.oauth_url = origin;
        self
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from environment variables
    pub fn from_env() -> crate::Result<Self> {
        Self::default().merge_with_env()
    }

    /// Override fields with environment variables that are set
    pub fn merge_with_env(mut self) -> crate::Result<Self> {
        if let Ok(url) = std::env::var("REDDIT_BASE_URL") {
            self.site.base_url = url;
        }

        if let Ok(url) = std::env::var("REDDIT_OAUTH_URL") {
            self.site.oauth_url = url;
        }

        if let Ok(domain) = std::env::var("REDDIT_COOKIE_DOMAIN") {
            self.site.cookie_domain = domain;
        }

        if let Ok(user_agent) = std::env::var("REDDIT_USER_AGENT") {
            self.site.user_agent = user_agent;
        }

        if let Ok(timeout) = std::env::var("REDDIT_TIMEOUT_SECS") {
            self.site.timeout_secs = timeout
                .parse()
                .map_err(|e| crate::Error::Config(format!("Invalid timeout: {}", e)))?;
        }

        if let Ok(max) = std::env::var("LISTING_MAX_FAILURES") {
            self.listing.max_consecutive_failures = max
                .parse()
                .map_err(|e| crate::Error::Config(format!("Invalid failure bound: {}", e)))?;
        }

        if let Ok(delay) = std::env::var("LISTING_RETRY_DELAY_MS") {
            self.listing.retry_delay_ms = delay
                .parse()
                .map_err(|e| crate::Error::Config(format!("Invalid retry delay: {}", e)))?;
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(self)
    }

    /// Validate the final configuration
    pub fn validate(&self) -> crate::Result<()> {
        for (name, value) in [
            ("site.base_url", &self.site.base_url),
            ("site.oauth_url", &self.site.oauth_url),
        ] {
            let url = url::Url::parse(value)
                .map_err(|e| crate::Error::config(format!("Invalid {}: {}", name, e)))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(crate::Error::config(format!(
                    "Invalid {}: unsupported scheme {}",
                    name,
                    url.scheme()
                )));
            }
        }

        if self.site.cookie_domain.is_empty() {
            return Err(crate::Error::config("site.cookie_domain must not be empty"));
        }

        if self.site.timeout_secs == 0 {
            return Err(crate::Error::config("site.timeout_secs must be positive"));
        }

        if !self.auth.context_path.starts_with('/') || !self.auth.modhash_path.starts_with('/') {
            return Err(crate::Error::config("auth paths must start with `/`"));
        }

        if self.listing.max_consecutive_failures == 0 {
            return Err(crate::Error::config(
                "listing.max_consecutive_failures must be at least 1",
            ));
        }

        Ok(())
    }
}
