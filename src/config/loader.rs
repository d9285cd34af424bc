//! Layered settings loading
//!
//! Layers apply lowest first: the loader's defaults, the TOML file, the
//! `REDDIT_*`/`LISTING_*`/`LOG_LEVEL` environment variables, then an explicit
//! origin override. File tables merge key by key over the defaults, so a
//! file only carries the keys it changes.

use crate::{Error, Result, config::Settings};
use std::path::{Path, PathBuf};
use toml::Value;
use tracing::{debug, info, warn};

/// Builder for [`Settings`] drawn from several sources
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    defaults: Settings,
    config_file: Option<PathBuf>,
    read_env: bool,
    origin: Option<String>,
}

impl ConfigLoader {
    /// Loader over the built-in site defaults
    pub fn new() -> Self {
        Self::with_defaults(Settings::default())
    }

    /// Loader whose lowest layer is `defaults`
    pub fn with_defaults(defaults: Settings) -> Self {
        Self {
            defaults,
            config_file: None,
            read_env: true,
            origin: None,
        }
    }

    /// TOML file layered over the defaults; a missing file is skipped with a warning
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Skip the environment layer
    pub fn without_env(mut self) -> Self {
        self.read_env = false;
        self
    }

    /// Route both hosts to `origin` after every other layer
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn defaults(&self) -> &Settings {
        &self.defaults
    }

    /// Resolve every layer and validate the result
    pub fn load(&self) -> Result<Settings> {
        let mut settings = match &self.config_file {
            Some(path) if path.exists() => {
                info!("Loading configuration from file: {:?}", path);
                self.overlay_file(path)?
            }
            Some(path) => {
                warn!("Configuration file not found: {:?}, using defaults", path);
                self.defaults.clone()
            }
            None => self.defaults.clone(),
        };

        if self.read_env {
            debug!("Applying environment variable overrides");
            settings = settings.merge_with_env()?;
        }
        if let Some(origin) = &self.origin {
            debug!("Routing both hosts to {}", origin);
            settings = settings.with_origin(origin.clone());
        }

        settings.validate()?;

        info!(
            "Configuration loaded: web {}, oauth {}, cookie domain {}, {} listing retries every {}ms",
            settings.site.base_url,
            settings.site.oauth_url,
            settings.site.cookie_domain,
            settings.listing.max_consecutive_failures,
            settings.listing.retry_delay_ms
        );
        Ok(settings)
    }

    fn overlay_file(&self, path: &Path) -> Result<Settings> {
        let content = std::fs::read_to_string(path)?;
        let file: toml::Table = toml::from_str(&content)?;

        let mut merged = Value::try_from(&self.defaults)
            .map_err(|e| Error::config(format!("Failed to layer configuration defaults: {}", e)))?;
        merge_value(&mut merged, Value::Table(file));
        Ok(merged.try_into()?)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Tables merge recursively; any other value replaces what is below it
fn merge_value(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base), Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_defaults() {
        let settings = ConfigLoader::new().without_env().load().unwrap();

        assert_eq!(settings.auth.context_path, "/");
        assert_eq!(settings.auth.modhash_path, "/api/me.json");
    }

    #[test]
    fn test_load_from_file() {
        let file = toml_file(
            r#"
[site]
base_url = "http://localhost:8080"
cookie_domain = ".localhost"

[listing]
max_consecutive_failures = 5
"#,
        );

        let settings = ConfigLoader::new().file(file.path()).without_env().load().unwrap();

        assert_eq!(settings.site.base_url, "http://localhost:8080");
        assert_eq!(settings.site.cookie_domain, ".localhost");
        assert_eq!(settings.site.oauth_url, "https://oauth.reddit.com");
        assert_eq!(settings.listing.max_consecutive_failures, 5);
    }

    #[test]
    fn test_file_layers_over_custom_defaults() {
        let mut defaults = Settings::default();
        defaults.site.user_agent = "custom-agent/2.0".to_string();
        defaults.listing.retry_delay_ms = 0;
        let file = toml_file("[listing]\nmax_consecutive_failures = 7\n");

        let settings = ConfigLoader::with_defaults(defaults)
            .file(file.path())
            .without_env()
            .load()
            .unwrap();

        assert_eq!(settings.listing.max_consecutive_failures, 7);
        assert_eq!(settings.listing.retry_delay_ms, 0);
        assert_eq!(settings.site.user_agent, "custom-agent/2.0");
    }

    #[test]
    fn test_origin_overrides_file_hosts() {
        let file = toml_file("[site]\nbase_url = \"https://old.reddit.com\"\n");

        let settings = ConfigLoader::new()
            .file(file.path())
            .origin("http://127.0.0.1:9000")
            .without_env()
            .load()
            .unwrap();

        assert_eq!(settings.site.base_url, "http://127.0.0.1:9000");
        assert_eq!(settings.site.oauth_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let loader = ConfigLoader::new()
            .file("/nonexistent/reddit-session.toml")
            .without_env();
        let settings = loader.load().unwrap();
        assert_eq!(settings.site.base_url, loader.defaults().site.base_url);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let file = toml_file("[site]\nbase_url = 12\n");

        assert!(matches!(
            ConfigLoader::new().file(file.path()).without_env().load(),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn test_invalid_result_fails_validation() {
        let file = toml_file("[listing]\nmax_consecutive_failures = 0\n");

        assert!(matches!(
            ConfigLoader::new().file(file.path()).without_env().load(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_env_var_override() {
        unsafe {
            std::env::set_var("REDDIT_USER_AGENT", "test-agent/1.0");
            std::env::set_var("LISTING_RETRY_DELAY_MS", "25");
        }

        let settings = ConfigLoader::new().load().unwrap();

        assert_eq!(settings.site.user_agent, "test-agent/1.0");
        assert_eq!(settings.listing.retry_delay_ms, 25);

        unsafe {
            std::env::remove_var("REDDIT_USER_AGENT");
            std::env::remove_var("LISTING_RETRY_DELAY_MS");
        }
    }
}
