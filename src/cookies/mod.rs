//! Cookie storage for one browser-like session
//!
//! Parses `Set-Cookie` responses, renders the `Cookie` request header,
//! expires stale entries and persists the jar as a flat JSON array.

pub mod cookie;
pub mod jar;
pub mod parse;
pub mod provider;

pub use cookie::{Cookie, Expiry, now_secs};
pub use jar::CookieJar;
pub use parse::parse_set_cookie;
pub use provider::{CookieFile, CookieProvider};
