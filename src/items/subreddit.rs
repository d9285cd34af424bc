//! Subreddits (`t5`)

use super::unescaped;
use crate::session::Session;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Subreddit {
    session: Arc<Session>,
    data: Value,
}

impl Subreddit {
    pub fn new(session: Arc<Session>, data: Value) -> Self {
        Self { session, data }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn name(&self) -> Option<&str> {
        self.data.get("name").and_then(Value::as_str)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.data.get("display_name").and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<String> {
        unescaped(&self.data, "title")
    }

    pub fn subscribers(&self) -> Option<u64> {
        self.data.get("subscribers").and_then(Value::as_u64)
    }
}
