//! Sources of the initial cookie set
//!
//! The login flow that produces a logged-in cookie set (browser automation,
//! DevTools export) lives outside this crate; a [`CookieProvider`] is all the
//! session needs from it.

use super::cookie::Cookie;
use crate::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Produces the cookies a session starts from
#[async_trait]
pub trait CookieProvider: Send + Sync {
    async fn initial_cookies(&self) -> Result<Vec<Cookie>>;
}

#[async_trait]
impl CookieProvider for Vec<Cookie> {
    async fn initial_cookies(&self) -> Result<Vec<Cookie>> {
        Ok(self.clone())
    }
}

/// A JSON cookie file, as written by [`CookieJar::save`](super::CookieJar::save)
#[derive(Debug, Clone)]
pub struct CookieFile {
    path: PathBuf,
}

impl CookieFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl CookieProvider for CookieFile {
    async fn initial_cookies(&self) -> Result<Vec<Cookie>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let cookies: Vec<Cookie> = serde_json::from_str(&content)?;
        tracing::debug!("Read {} cookies from {:?}", cookies.len(), self.path);
        Ok(cookies)
    }
}
