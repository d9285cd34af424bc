//! Links and self posts (`t3`)

use super::{find_thing, fullname, json_path, replies_listing, unescaped};
use crate::api::VoteDirection;
use crate::listing::Listing;
use crate::session::Session;
use crate::types::{Params, ResponseFormat};
use crate::{Error, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Link {
    session: Arc<Session>,
    data: Value,
}

impl Link {
    pub fn new(session: Arc<Session>, data: Value) -> Self {
        Self { session, data }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn name(&self) -> Option<&str> {
        self.data.get("name").and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<String> {
        unescaped(&self.data, "title")
    }

    /// Post text; inbox entries carry it as `body`, threads as `selftext`
    pub fn body(&self) -> Option<String> {
        unescaped(&self.data, "body").or_else(|| unescaped(&self.data, "selftext"))
    }

    pub fn is_complete(&self) -> bool {
        self.data.get("permalink").is_some()
    }

    /// This post as its own thread page presents it
    pub async fn get_complete(&self) -> Result<Link> {
        if self.is_complete() {
            return Ok(self.clone());
        }

        let name = fullname(&self.data)?;
        let path = self.thread_path(name);
        debug!("Completing {} from {}", name, path);

        let thread = self.fetch_thread(&path).await?;
        let data = find_thing(&thread, name)
            .cloned()
            .ok_or_else(|| Error::internal(format!("{} not found in {}", name, path)))?;
        Ok(Link::new(Arc::clone(&self.session), data))
    }

    /// Top-level comments of the thread, expandable through "more" nodes
    pub async fn comments(&self) -> Result<Listing> {
        let name = fullname(&self.data)?;
        let path = self.thread_path(name);
        let mut thread = self.fetch_thread(&path).await?;

        let comments = thread
            .get_mut(1)
            .map(Value::take)
            .ok_or_else(|| Error::internal(format!("{} has no comment listing", path)))?;
        Listing::from_raw(Arc::clone(&self.session), comments, Some(name.to_string()))
    }

    /// Replies embedded in this record, if any
    pub async fn replies(&self) -> Result<Option<Listing>> {
        let link_id = self
            .data
            .get("link_id")
            .and_then(Value::as_str)
            .or_else(|| self.name());
        replies_listing(&self.session, &self.data, link_id)
    }

    pub async fn read(&self) -> Result<Value> {
        self.session.read_message(fullname(&self.data)?, &Params::new()).await
    }

    pub async fn unread(&self) -> Result<Value> {
        self.session.unread_message(fullname(&self.data)?, &Params::new()).await
    }

    pub async fn collapse(&self) -> Result<Value> {
        self.session.collapse_message(fullname(&self.data)?, &Params::new()).await
    }

    pub async fn uncollapse(&self) -> Result<Value> {
        self.session.uncollapse_message(fullname(&self.data)?, &Params::new()).await
    }

    pub async fn vote(&self, dir: VoteDirection) -> Result<Value> {
        self.session.vote(fullname(&self.data)?, dir, &Params::new()).await
    }

    pub async fn reply(&self, text: &str, options: &Params) -> Result<Value> {
        self.session.comment(fullname(&self.data)?, text, options).await
    }

    pub async fn edit(&self, text: &str, options: &Params) -> Result<Value> {
        self.session.editusertext(fullname(&self.data)?, text, options).await
    }

    /// Edit with `text` added to the end of the current body
    pub async fn append(&self, text: &str, options: &Params) -> Result<Value> {
        let body = self.body().unwrap_or_default() + text;
        self.edit(&body, options).await
    }

    pub async fn del(&self) -> Result<Value> {
        self.session.del(fullname(&self.data)?, &Params::new()).await
    }

    /// `permalink`, then `context`, then the short `/comments/<id>` form
    fn thread_path(&self, name: &str) -> String {
        match ["permalink", "context"]
            .iter()
            .find_map(|key| self.data.get(*key).and_then(Value::as_str))
        {
            Some(path) => json_path(path),
            None => json_path(&format!("/comments/{}", name.trim_start_matches("t3_"))),
        }
    }

    async fn fetch_thread(&self, path: &str) -> Result<Value> {
        self.session
            .fetch_json(path, &Params::new(), ResponseFormat::Json)
            .await?
            .into_json()
    }
}
