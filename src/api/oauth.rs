//! Bearer-authenticated actions on the OAuth host

use super::{web_client_query, with_query};
use crate::session::Session;
use crate::types::{Params, ResponseFormat};
use crate::Result;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Vote value sent as `dir`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    /// Clears a previous vote
    None,
    Down,
}

impl VoteDirection {
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Up => 1,
            Self::None => 0,
            Self::Down => -1,
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

/// Post type of [`Session::submit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitKind {
    /// Text post
    #[default]
    SelfPost,
    Link,
}

impl SubmitKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SelfPost => "self",
            Self::Link => "link",
        }
    }
}

impl Session {
    /// Reply to `thing_id` (a comment, link or message fullname)
    pub async fn comment(&self, thing_id: &str, text: &str, options: &Params) -> Result<Value> {
        debug!("Commenting on {}", thing_id);
        let form = user_text_form(thing_id, text).merge(options);
        self.post_oauth("/api/comment", &web_client_query(), &form).await
    }

    /// Replace the body of the caller's own comment or self post
    pub async fn editusertext(&self, thing_id: &str, text: &str, options: &Params) -> Result<Value> {
        debug!("Editing {}", thing_id);
        let form = user_text_form(thing_id, text).merge(options);
        self.post_oauth("/api/editusertext", &web_client_query(), &form).await
    }

    /// Create a post in subreddit `sr`; `body` is the text or the URL depending on `kind`
    pub async fn submit(
        &self,
        sr: &str,
        title: &str,
        body: &str,
        kind: SubmitKind,
        options: &Params,
    ) -> Result<Value> {
        debug!("Submitting {} post to {}", kind.as_str(), sr);
        let query = Params::new()
            .with("resubmit", true)
            .with("redditWebClient", "desktop2x")
            .with("app", "desktop2x-client-production")
            .with("raw_json", 1)
            .with("gilding_detail", 1);

        let body_field = match kind {
            SubmitKind::Link => "url",
            SubmitKind::SelfPost => "text",
        };
        let form = Params::new()
            .with("sr", sr)
            .with("submit_type", "subreddit")
            .with("api_type", "json")
            .with("show_error_list", true)
            .with("title", title)
            .with("spoiler", false)
            .with("nsfw", false)
            .with("kind", kind.as_str())
            .with("original_content", false)
            .with("post_to_twitter", false)
            .with("sendreplies", true)
            .with(body_field, body)
            .with("text", body)
            .with("url", body)
            .with("validate_on_submit", true)
            .merge(options);

        self.post_oauth("/api/submit", &query, &form).await
    }

    /// Delete the caller's own comment or post
    pub async fn del(&self, id: &str, options: &Params) -> Result<Value> {
        debug!("Deleting {}", id);
        let form = Params::new().with("id", id).merge(options);
        self.post_oauth("/api/del", &web_client_query(), &form).await
    }

    pub async fn vote(&self, id: &str, dir: VoteDirection, options: &Params) -> Result<Value> {
        debug!("Voting {} on {}", dir, id);
        let form = Params::new().with("id", id).with("dir", dir).merge(options);
        self.post_oauth("/api/vote", &web_client_query(), &form).await
    }

    async fn post_oauth(&self, path: &str, query: &Params, form: &Params) -> Result<Value> {
        self.fetch_oauth(&with_query(path, query), form, None, ResponseFormat::Json)
            .await?
            .into_json()
    }
}

fn user_text_form(thing_id: &str, text: &str) -> Params {
    Params::new()
        .with("api_type", "json")
        .with("return_rtjson", true)
        .with("thing_id", thing_id)
        .with("text", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_direction_values() {
        assert_eq!(VoteDirection::Up.to_string(), "1");
        assert_eq!(VoteDirection::None.to_string(), "0");
        assert_eq!(VoteDirection::Down.to_string(), "-1");
    }

    #[test]
    fn test_user_text_form_overlay() {
        let form = user_text_form("t1_abc", "hello").merge(&Params::new().with("return_rtjson", false));
        assert_eq!(
            form.encode(),
            "api_type=json&return_rtjson=false&thing_id=t1_abc&text=hello"
        );
    }

    #[test]
    fn test_submit_kind() {
        assert_eq!(SubmitKind::default().as_str(), "self");
        assert_eq!(SubmitKind::Link.as_str(), "link");
    }
}
