//! Inbox listings and the batch children endpoint

use crate::listing::Listing;
use crate::session::Session;
use crate::types::{Params, RawThing, ResponseFormat};
use crate::Result;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Batch endpoint resolving "more" placeholders
pub const MORE_CHILDREN_PATH: &str = "/api/morechildren";

impl Session {
    pub async fn messages_inbox(self: &Arc<Self>, options: Params) -> Result<Listing> {
        Listing::from_path(Arc::clone(self), "/message/inbox.json", options).await
    }

    /// Private messages only
    pub async fn message_messages(self: &Arc<Self>, options: Params) -> Result<Listing> {
        Listing::from_path(Arc::clone(self), "/message/messages.json", options).await
    }

    /// Replies to the caller's comments
    pub async fn message_comments(self: &Arc<Self>, options: Params) -> Result<Listing> {
        Listing::from_path(Arc::clone(self), "/message/comments.json", options).await
    }

    /// Replies to the caller's posts
    pub async fn message_selfreply(self: &Arc<Self>, options: Params) -> Result<Listing> {
        Listing::from_path(Arc::clone(self), "/message/selfreply.json", options).await
    }

    pub async fn message_unread(self: &Arc<Self>, options: Params) -> Result<Listing> {
        Listing::from_path(Arc::clone(self), "/message/unread.json", options).await
    }

    /// Username mentions
    pub async fn message_mention(self: &Arc<Self>, options: Params) -> Result<Listing> {
        Listing::from_path(Arc::clone(self), "/message/mention.json", options).await
    }

    /// Resolve placeholder `children` ids of thread `link_id`.
    ///
    /// The result may itself contain nested "more" things.
    pub async fn more_children(&self, link_id: &str, children: &[String]) -> Result<Vec<RawThing>> {
        debug!("Expanding {} children of {}", children.len(), link_id);
        let query = Params::new()
            .with("api_type", "json")
            .with("link_id", link_id)
            .with("children", children.join(","));
        let value = self
            .fetch_json(MORE_CHILDREN_PATH, &query, ResponseFormat::Json)
            .await?
            .into_json()?;
        things_of(value)
    }
}

/// `json.data.things`, empty when absent
fn things_of(mut value: Value) -> Result<Vec<RawThing>> {
    match value.pointer_mut("/json/data/things").map(Value::take) {
        Some(things) if !things.is_null() => Ok(serde_json::from_value(things)?),
        _ => Ok(Vec::new()),
    }
}
