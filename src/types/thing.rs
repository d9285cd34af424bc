//! Tagged wire records
//!
//! Every entity the site returns is a `{kind, data}` pair: listings, items
//! and "more" placeholders alike.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The closed set of tags, plus a passthrough for anything else
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Kind {
    /// `t1`
    Comment,
    /// `t2`
    Account,
    /// `t3`
    Link,
    /// `t4`
    Message,
    /// `t5`
    Subreddit,
    /// Placeholder for unexpanded comment ids
    More,
    Listing,
    Other(String),
}

impl Kind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Comment => "t1",
            Self::Account => "t2",
            Self::Link => "t3",
            Self::Message => "t4",
            Self::Subreddit => "t5",
            Self::More => "more",
            Self::Listing => "Listing",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for Kind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "t1" => Self::Comment,
            "t2" => Self::Account,
            "t3" => Self::Link,
            "t4" => Self::Message,
            "t5" => Self::Subreddit,
            "more" => Self::More,
            "Listing" => Self::Listing,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for Kind {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{kind, data}` as received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawThing {
    pub kind: Kind,
    #[serde(default)]
    pub data: Value,
}

impl RawThing {
    pub fn new(kind: impl Into<Kind>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }

    pub fn is_more(&self) -> bool {
        self.kind == Kind::More
    }

    /// Fullname (`t1_abc`), the subject of every action call
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}

/// `data` of a `Listing` thing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub children: Vec<RawThing>,
}

/// `data` of a `more` thing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoreData {
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_tags() {
        for (tag, kind) in [
            ("t1", Kind::Comment),
            ("t2", Kind::Account),
            ("t3", Kind::Link),
            ("t4", Kind::Message),
            ("t5", Kind::Subreddit),
            ("more", Kind::More),
            ("Listing", Kind::Listing),
        ] {
            assert_eq!(Kind::from(tag), kind);
            assert_eq!(kind.as_str(), tag);
        }
        assert_eq!(Kind::from("t6"), Kind::Other("t6".to_string()));
    }

    #[test]
    fn test_raw_thing_deserialize() {
        let thing: RawThing = serde_json::from_value(json!({
            "kind": "t4",
            "data": {"name": "t4_zz", "body": "hi"}
        }))
        .unwrap();
        assert_eq!(thing.kind, Kind::Message);
        assert_eq!(thing.name(), Some("t4_zz"));
    }

    #[test]
    fn test_unknown_kind_keeps_tag() {
        let thing: RawThing =
            serde_json::from_value(json!({"kind": "LabeledMulti", "data": {}})).unwrap();
        assert_eq!(thing.kind.as_str(), "LabeledMulti");
        assert_eq!(serde_json::to_value(&thing).unwrap()["kind"], "LabeledMulti");
    }

    #[test]
    fn test_listing_data_defaults() {
        let data: ListingData = serde_json::from_value(json!({"children": []})).unwrap();
        assert!(data.after.is_none());
        assert!(data.children.is_empty());
    }

    #[test]
    fn test_more_data() {
        let more: MoreData = serde_json::from_value(json!({
            "count": 3, "children": ["a", "b", "c"], "parent_id": "t1_p", "name": "t1_a"
        }))
        .unwrap();
        assert_eq!(more.children, vec!["a", "b", "c"]);
        assert_eq!(more.parent_id.as_deref(), Some("t1_p"));
    }
}
