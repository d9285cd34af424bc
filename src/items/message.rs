//! Private messages (`t4`)

use super::{fullname, unescaped};
use crate::session::Session;
use crate::types::Params;
use crate::Result;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Message {
    session: Arc<Session>,
    data: Value,
}

impl Message {
    pub fn new(session: Arc<Session>, data: Value) -> Self {
        Self { session, data }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn name(&self) -> Option<&str> {
        self.data.get("name").and_then(Value::as_str)
    }

    pub fn subject(&self) -> Option<String> {
        unescaped(&self.data, "subject")
    }

    pub fn author(&self) -> Option<&str> {
        self.data.get("author").and_then(Value::as_str)
    }

    pub fn body(&self) -> Option<String> {
        unescaped(&self.data, "body")
    }

    pub fn is_new(&self) -> bool {
        self.data.get("new").and_then(Value::as_bool).unwrap_or(false)
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

    pub async fn reply(&self, text: &str, options: &Params) -> Result<Value> {
        self.session.comment(fullname(&self.data)?, text, options).await
    }

    pub async fn del(&self) -> Result<Value> {
        self.session.del(fullname(&self.data)?, &Params::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::Error;
    use serde_json::json;

    fn message(data: Value) -> Message {
        let session = Arc::new(Session::new(Settings::default(), Vec::new()).unwrap());
        Message::new(session, data)
    }

    #[test]
    fn test_accessors() {
        let m = message(json!({
            "name": "t4_x", "subject": "re: &lt;hi&gt;", "author": "someone",
            "body": "fish &amp; chips", "new": true
        }));
        assert_eq!(m.name(), Some("t4_x"));
        assert_eq!(m.subject().as_deref(), Some("re: <hi>"));
        assert_eq!(m.author(), Some("someone"));
        assert_eq!(m.body().as_deref(), Some("fish & chips"));
        assert!(m.is_new());
    }

    #[tokio::test]
    async fn test_action_without_fullname_fails_before_sending() {
        let m = message(json!({"body": "orphan"}));
        assert!(matches!(m.read().await, Err(Error::Internal(_))));
    }
}
