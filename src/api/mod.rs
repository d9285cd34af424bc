//! Endpoint wrappers
//!
//! Each wrapper builds the query string and form body the site's own web
//! client sends for one action and hands it to the matching dialect of
//! [`Session`](crate::Session). Caller options are overlaid last, so they can
//! override any default field.

pub mod legacy;
pub mod listings;
pub mod oauth;

pub use oauth::{SubmitKind, VoteDirection};

use crate::types::Params;

/// Query string every OAuth action of the desktop web client carries
pub(crate) fn web_client_query() -> Params {
    Params::new()
        .with("rtj", "only")
        .with("emotes_as_images", true)
        .with("redditWebClient", "desktop2x")
        .with("app", "desktop2x-client-production")
        .with("raw_json", 1)
        .with("gilding_detail", 1)
}

/// `path?query`
pub(crate) fn with_query(path: &str, query: &Params) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query.encode())
    }
}
