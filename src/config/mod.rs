//! Configuration management for the session client
//!
//! This module handles loading and managing configuration settings:
//! site hosts, handshake paths, listing retry policy and logging.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::{AuthSettings, ListingSettings, LoggingSettings, Settings, SiteSettings};
