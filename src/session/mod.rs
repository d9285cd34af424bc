//! Session management for one authenticated identity
//!
//! This module holds the request engine and everything it sends with:
//! the fixed browser header profiles, the two authentication handshakes and
//! the cookie-aware transport plumbing they share.

pub mod authenticator;
pub mod engine;
pub mod profiles;
pub(crate) mod transport;

pub use authenticator::{LegacyAuthenticator, SessionAuthenticator, ShellSession};
pub use engine::{MODHASH_FIELD, Session};
pub use profiles::HeaderProfile;
