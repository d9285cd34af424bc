//! Typed wrappers over raw tagged records
//!
//! [`Item::from_raw`] is the single dispatch point from a [`RawThing`] to
//! its variant. Every variant keeps an `Arc` to the session that fetched it,
//! so its actions run with the session's current cookies rather than a
//! snapshot from when the item was built.

pub mod account;
pub mod comment;
pub mod link;
pub mod message;
pub mod subreddit;

pub use account::Account;
pub use comment::Comment;
pub use link::Link;
pub use message::Message;
pub use subreddit::Subreddit;

use crate::session::Session;
use crate::types::{Kind, RawThing};
use crate::{Error, Result};
use serde_json::Value;
use std::sync::Arc;

/// A listing entry, by kind
#[derive(Debug, Clone)]
pub enum Item {
    Comment(Comment),
    Account(Account),
    Link(Link),
    Message(Message),
    Subreddit(Subreddit),
    /// Unrecognised kinds, passed through without actions
    Raw(RawThing),
}

impl Item {
    pub fn from_raw(session: Arc<Session>, raw: RawThing) -> Self {
        let RawThing { kind, data } = raw;
        match kind {
            Kind::Comment => Self::Comment(Comment::new(session, data)),
            Kind::Account => Self::Account(Account::new(session, data)),
            Kind::Link => Self::Link(Link::new(session, data)),
            Kind::Message => Self::Message(Message::new(session, data)),
            Kind::Subreddit => Self::Subreddit(Subreddit::new(session, data)),
            kind @ (Kind::More | Kind::Listing | Kind::Other(_)) => Self::Raw(RawThing { kind, data }),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Self::Comment(_) => Kind::Comment,
            Self::Account(_) => Kind::Account,
            Self::Link(_) => Kind::Link,
            Self::Message(_) => Kind::Message,
            Self::Subreddit(_) => Kind::Subreddit,
            Self::Raw(raw) => raw.kind.clone(),
        }
    }

    pub fn data(&self) -> &Value {
        match self {
            Self::Comment(c) => c.data(),
            Self::Account(a) => a.data(),
            Self::Link(l) => l.data(),
            Self::Message(m) => m.data(),
            Self::Subreddit(s) => s.data(),
            Self::Raw(raw) => &raw.data,
        }
    }

    /// The record's `name` field: the fullname for everything but accounts,
    /// whose `name` is the username
    pub fn name(&self) -> Option<&str> {
        self.data().get("name").and_then(Value::as_str)
    }

    pub fn into_comment(self) -> Result<Comment> {
        match self {
            Self::Comment(c) => Ok(c),
            other => Err(Error::unexpected_kind("t1", other.kind().as_str())),
        }
    }

    pub fn into_link(self) -> Result<Link> {
        match self {
            Self::Link(l) => Ok(l),
            other => Err(Error::unexpected_kind("t3", other.kind().as_str())),
        }
    }

    pub fn into_message(self) -> Result<Message> {
        match self {
            Self::Message(m) => Ok(m),
            other => Err(Error::unexpected_kind("t4", other.kind().as_str())),
        }
    }
}

/// Fullname every action call is addressed to
pub(crate) fn fullname(data: &Value) -> Result<&str> {
    data.get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::internal("item has no fullname"))
}

/// HTML-unescaped string field
pub(crate) fn unescaped(data: &Value, key: &str) -> Option<String> {
    data.get(key)
        .and_then(Value::as_str)
        .map(|s| html_escape::decode_html_entities(s).into_owned())
}

/// JSON document of a permalink or context path: query dropped, `.json` appended
pub(crate) fn json_path(path: &str) -> String {
    let path = path.split('?').next().unwrap_or(path);
    format!("{}.json", path.trim_end_matches('/'))
}

/// Depth-first search of a thread document for the thing named `name`,
/// through listing children and nested `replies`
pub(crate) fn find_thing<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    match value {
        Value::Array(values) => values.iter().find_map(|v| find_thing(v, name)),
        Value::Object(map) => {
            let data = map.get("data")?;
            let is_listing = map.get("kind").and_then(Value::as_str) == Some("Listing");
            if !is_listing && data.get("name").and_then(Value::as_str) == Some(name) {
                return Some(data);
            }
            if let Some(found) = data
                .get("children")
                .and_then(Value::as_array)
                .and_then(|children| children.iter().find_map(|c| find_thing(c, name)))
            {
                return Some(found);
            }
            data.get("replies").and_then(|replies| find_thing(replies, name))
        }
        _ => None,
    }
}

/// Listing held in a thing's `replies` field; the site sends `""` when empty
pub(crate) fn replies_listing(
    session: &Arc<Session>,
    data: &Value,
    link_id: Option<&str>,
) -> Result<Option<crate::listing::Listing>> {
    match data.get("replies") {
        Some(replies @ Value::Object(_)) => Ok(Some(crate::listing::Listing::from_raw(
            Arc::clone(session),
            replies.clone(),
            link_id.map(str::to_string),
        )?)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use serde_json::json;

    fn session() -> Arc<Session> {
        Arc::new(Session::new(Settings::default(), Vec::new()).unwrap())
    }

    #[test]
    fn test_from_raw_dispatch() {
        let cases = [
            ("t1", Kind::Comment),
            ("t2", Kind::Account),
            ("t3", Kind::Link),
            ("t4", Kind::Message),
            ("t5", Kind::Subreddit),
            ("more", Kind::More),
            ("modaction", Kind::Other("modaction".to_string())),
        ];
        for (tag, kind) in cases {
            let item = Item::from_raw(session(), RawThing::new(tag, json!({"name": "x"})));
            assert_eq!(item.kind(), kind);
            assert_eq!(item.name(), Some("x"));
        }
    }

    #[test]
    fn test_unknown_kind_is_raw() {
        let item = Item::from_raw(session(), RawThing::new("modaction", json!({"id": 1})));
        assert!(matches!(item, Item::Raw(ref raw) if raw.data["id"] == 1));
    }

    #[test]
    fn test_into_variant_mismatch() {
        let item = Item::from_raw(session(), RawThing::new("t4", json!({})));
        let err = item.into_comment().unwrap_err();
        assert!(matches!(err, Error::UnexpectedKind { ref found, .. } if found == "t4"));
    }

    #[test]
    fn test_json_path() {
        assert_eq!(
            json_path("/r/rust/comments/abc/title/def/?context=3"),
            "/r/rust/comments/abc/title/def.json"
        );
        assert_eq!(json_path("/r/rust/comments/abc/title/"), "/r/rust/comments/abc/title.json");
    }

    #[test]
    fn test_unescaped() {
        let data = json!({"body": "a &amp; b &lt;3"});
        assert_eq!(unescaped(&data, "body").as_deref(), Some("a & b <3"));
        assert_eq!(unescaped(&data, "selftext"), None);
    }

    #[test]
    fn test_find_thing_in_nested_replies() {
        let doc = json!([
            {"kind": "Listing", "data": {"children": [{"kind": "t3", "data": {"name": "t3_l"}}]}},
            {"kind": "Listing", "data": {"children": [
                {"kind": "t1", "data": {"name": "t1_a", "replies": {"kind": "Listing", "data": {"children": [
                    {"kind": "t1", "data": {"name": "t1_b", "body": "deep", "replies": ""}},
                    {"kind": "more", "data": {"children": ["c"]}}
                ]}}}}
            ]}}
        ]);
        assert_eq!(find_thing(&doc, "t1_b").unwrap()["body"], "deep");
        assert_eq!(find_thing(&doc, "t3_l").unwrap()["name"], "t3_l");
        assert!(find_thing(&doc, "t1_zz").is_none());
    }
}
