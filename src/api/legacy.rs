//! Message state changes through the legacy modhash form dialect

use crate::session::Session;
use crate::types::{Params, ResponseFormat};
use crate::Result;
use serde_json::Value;
use tracing::debug;

impl Session {
    pub async fn read_message(&self, id: &str, options: &Params) -> Result<Value> {
        self.message_state("read", id, options).await
    }

    /// Mark every inbox item read
    pub async fn read_all_messages(&self, options: &Params) -> Result<Value> {
        debug!("Marking all messages read");
        self.post_legacy("/api/read_all_messages?embedded=true", options).await
    }

    pub async fn unread_message(&self, id: &str, options: &Params) -> Result<Value> {
        self.message_state("unread", id, options).await
    }

    pub async fn collapse_message(&self, id: &str, options: &Params) -> Result<Value> {
        self.message_state("collapse", id, options).await
    }

    pub async fn uncollapse_message(&self, id: &str, options: &Params) -> Result<Value> {
        self.message_state("uncollapse", id, options).await
    }

    /// `executed` names both the endpoint and the state it applies
    async fn message_state(&self, executed: &str, id: &str, options: &Params) -> Result<Value> {
        debug!("Marking {} as {}", id, executed);
        let form = Params::new()
            .with("id", id)
            .with("executed", executed)
            .with("embedded", "web2x")
            .with("renderstyle", "html")
            .merge(options);
        let path = format!("/api/{}_message?embedded=true", executed);
        self.post_legacy(&path, &form).await
    }

    async fn post_legacy(&self, path: &str, form: &Params) -> Result<Value> {
        self.fetch_legacy_form(path, form, ResponseFormat::Json)
            .await?
            .into_json()
    }
}
