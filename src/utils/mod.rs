//! Utility functions and helpers
//!
//! This module contains utility functions used throughout the crate.

pub mod logging;

pub use logging::init_logging;
