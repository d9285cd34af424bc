//! Logging initialisation
//!
//! Installs a `tracing` subscriber writing to stderr. `RUST_LOG` wins when
//! set; otherwise the configured level is used, or `debug` when verbose.

use crate::config::LoggingSettings;
use crate::{Error, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Directive the subscriber falls back to without `RUST_LOG`
pub fn default_directive(settings: &LoggingSettings) -> String {
    if settings.verbose {
        "debug".to_string()
    } else {
        settings.level.clone()
    }
}

/// Install the global subscriber; fails if one is already installed
pub fn init_logging(settings: &LoggingSettings) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive(settings).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| Error::config(format!("Failed to initialise logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        let mut settings = LoggingSettings::default();
        assert_eq!(default_directive(&settings), "info");

        settings.level = "warn".to_string();
        assert_eq!(default_directive(&settings), "warn");

        settings.verbose = true;
        assert_eq!(default_directive(&settings), "debug");
    }

    #[test]
    fn test_double_init_fails() {
        let settings = LoggingSettings::default();
        let _ = init_logging(&settings);
        assert!(matches!(init_logging(&settings), Err(Error::Config(_))));
    }
}
