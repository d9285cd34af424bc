//! In-memory cookie jar
//!
//! Holds the cookies of one session in insertion order. Names are unique;
//! stale entries are pruned whenever the jar is read for a request header.
//! The jar itself is not synchronised: the owning [`Session`](crate::Session)
//! keeps it behind a lock.

use super::cookie::{Cookie, now_secs};
use super::parse::parse_set_cookie;
use crate::Result;
use std::path::Path;
use tracing::{debug, warn};

/// Ordered set of cookies for one identity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CookieJar {
    cookies: Vec<Cookie>,
    default_domain: String,
}

impl CookieJar {
    /// Empty jar; parsed cookies without a `Domain` get `default_domain`
    pub fn new(default_domain: impl Into<String>) -> Self {
        Self {
            cookies: Vec::new(),
            default_domain: default_domain.into(),
        }
    }

    /// Jar seeded with a bulk cookie set (login flow output, saved file)
    pub fn from_cookies(default_domain: impl Into<String>, cookies: impl IntoIterator<Item = Cookie>) -> Self {
        let mut jar = Self::new(default_domain);
        for cookie in cookies {
            jar.set_cookie(cookie);
        }
        jar
    }

    pub fn default_domain(&self) -> &str {
        &self.default_domain
    }

    /// Prune expired cookies and render the `Cookie` request header
    pub fn prepare_header(&mut self) -> String {
        self.prepare_header_at(now_secs())
    }

    /// [`prepare_header`](Self::prepare_header) against an explicit clock
    pub fn prepare_header_at(&mut self, now: f64) -> String {
        self.prune_at(now);
        self.cookies
            .iter()
            .map(Cookie::pair)
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Drop every non-session cookie whose expiry is at or before `now`
    pub fn prune_at(&mut self, now: f64) -> usize {
        let before = self.cookies.len();
        self.cookies.retain(|cookie| !cookie.is_expired(now));
        let pruned = before - self.cookies.len();
        if pruned > 0 {
            debug!("Pruned {} expired cookies", pruned);
        }
        pruned
    }

    /// Merge `Set-Cookie` header values; returns how many were applied.
    ///
    /// A malformed value is logged and skipped without affecting the rest.
    pub fn apply_set_cookie<I, S>(&mut self, headers: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.apply_set_cookie_at(headers, now_secs())
    }

    /// [`apply_set_cookie`](Self::apply_set_cookie) against an explicit clock
    pub fn apply_set_cookie_at<I, S>(&mut self, headers: I, now: f64) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut applied = 0;
        for raw in headers {
            match parse_set_cookie(raw.as_ref(), &self.default_domain, now) {
                Ok(cookie) => {
                    self.set_cookie(cookie);
                    applied += 1;
                }
                Err(e) => warn!("Skipping cookie: {}", e),
            }
        }
        applied
    }

    /// Upsert by name.
    ///
    /// An existing cookie is overwritten in place (keeping its position); an
    /// empty value deletes it instead. An empty value for an unknown name is
    /// a no-op.
    pub fn set_cookie(&mut self, cookie: Cookie) {
        let existing = self.cookies.iter().position(|c| c.name == cookie.name);
        match (existing, cookie.value.is_empty()) {
            (Some(index), true) => {
                debug!("Removing cookie {}", cookie.name);
                self.cookies.remove(index);
            }
            (Some(index), false) => self.cookies[index] = cookie,
            (None, true) => {}
            (None, false) => self.cookies.push(cookie),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.cookies.iter().find(|c| c.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Cookie> {
        let index = self.cookies.iter().position(|c| c.name == name)?;
        Some(self.cookies.remove(index))
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cookie> {
        self.cookies.iter()
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Serialize as a flat JSON array of records
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.cookies)?)
    }

    pub fn from_json(default_domain: impl Into<String>, json: &str) -> Result<Self> {
        let cookies: Vec<Cookie> = serde_json::from_str(json)?;
        Ok(Self::from_cookies(default_domain, cookies))
    }

    /// Write the jar to `path` as a JSON array
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        debug!("Saved {} cookies to {:?}", self.cookies.len(), path);
        Ok(())
    }

    /// Rebuild a jar from a file written by [`save`](Self::save) or a browser export
    pub fn load(path: &Path, default_domain: impl Into<String>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let jar = Self::from_json(default_domain, &content)?;
        debug!("Loaded {} cookies from {:?}", jar.len(), path);
        Ok(jar)
    }
}
