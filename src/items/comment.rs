//! Comments (`t1`)

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
pub struct Comment {
    session: Arc<Session>,
    data: Value,
}

impl Comment {
    pub fn new(session: Arc<Session>, data: Value) -> Self {
        Self { session, data }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn name(&self) -> Option<&str> {
        self.data.get("name").and_then(Value::as_str)
    }

    /// Fullname of the thread this comment belongs to
    pub fn link_id(&self) -> Option<&str> {
        self.data.get("link_id").and_then(Value::as_str)
    }

    pub fn body(&self) -> Option<String> {
        unescaped(&self.data, "body")
    }

    /// Inbox and mention listings deliver comments without their thread
    /// context; those lack a `permalink`.
    pub fn is_complete(&self) -> bool {
        self.data.get("permalink").is_some()
    }

    /// This comment as it appears in its thread
    pub async fn get_complete(&self) -> Result<Comment> {
        if self.is_complete() {
            return Ok(self.clone());
        }

        let name = fullname(&self.data)?;
        let context = self
            .data
            .get("context")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::internal(format!("{} has no context path", name)))?;
        let path = json_path(context);
        debug!("Completing {} from {}", name, path);

        let thread = self
            .session
            .fetch_json(&path, &Params::new(), ResponseFormat::Json)
            .await?
            .into_json()?;
        let data = find_thing(&thread, name)
            .cloned()
            .ok_or_else(|| Error::internal(format!("{} not found in {}", name, path)))?;
        Ok(Comment::new(Arc::clone(&self.session), data))
    }

    /// Replies of the complete comment, expandable within its thread
    pub async fn replies(&self) -> Result<Option<Listing>> {
        let complete = self.get_complete().await?;
        replies_listing(&self.session, &complete.data, complete.link_id())
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

    pub async fn del(&self) -> Result<Value> {
        self.session.del(fullname(&self.data)?, &Params::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use serde_json::json;

    fn comment(data: Value) -> Comment {
        let session = Arc::new(Session::new(Settings::default(), Vec::new()).unwrap());
        Comment::new(session, data)
    }

    #[test]
    fn test_completeness() {
        assert!(comment(json!({"name": "t1_a", "permalink": "/r/x/comments/l/t/a/"})).is_complete());
        assert!(!comment(json!({"name": "t1_a", "context": "/r/x/comments/l/t/a/?context=3"})).is_complete());
    }

    #[test]
    fn test_body_unescaped() {
        let c = comment(json!({"body": "&gt; quoted &quot;text&quot;"}));
        assert_eq!(c.body().as_deref(), Some("> quoted \"text\""));
    }

    #[tokio::test]
    async fn test_complete_comment_returns_itself() {
        let c = comment(json!({"name": "t1_a", "permalink": "/p/", "link_id": "t3_l"}));
        let complete = c.get_complete().await.unwrap();
        assert_eq!(complete.name(), Some("t1_a"));
    }

    #[tokio::test]
    async fn test_replies_empty_string_is_none() {
        let c = comment(json!({"name": "t1_a", "permalink": "/p/", "replies": ""}));
        assert!(c.replies().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replies_bound_to_thread() {
        let c = comment(json!({
            "name": "t1_a", "permalink": "/p/", "link_id": "t3_l",
            "replies": {"kind": "Listing", "data": {"after": null, "children": [
                {"kind": "t1", "data": {"name": "t1_b"}}
            ]}}
        }));
        let replies = c.replies().await.unwrap().unwrap();
        assert_eq!(replies.link_id(), Some("t3_l"));
        assert_eq!(replies.len(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_without_context_fails() {
        let c = comment(json!({"name": "t1_a"}));
        assert!(matches!(c.get_complete().await, Err(Error::Internal(_))));
    }
}
