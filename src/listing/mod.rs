//! Paginated result sets
//!
//! A [`Listing`] is one fetched page plus what is needed to fetch the next:
//! the originating path and query, and the `after` cursor. Iterating it with
//! [`Listing::iter`] walks every page and expands "more" placeholders along
//! the way; [`Listing::page`] only walks what was already fetched.

pub mod iterator;

pub use iterator::ListingIterator;

use crate::items::Item;
use crate::session::Session;
use crate::types::{Kind, ListingData, Params, RawThing, ResponseFormat};
use crate::{Error, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Where a listing's pages come from
#[derive(Debug, Clone)]
pub(crate) struct Source {
    pub path: String,
    pub options: Params,
}

/// One page of a listing and its continuation cursor
#[derive(Debug, Clone)]
pub struct Listing {
    session: Arc<Session>,
    source: Option<Source>,
    data: ListingData,
    link_id: Option<String>,
}

impl Listing {
    /// Fetch the first page of `path` with `options` as its query
    pub async fn from_path(session: Arc<Session>, path: &str, options: Params) -> Result<Self> {
        let data = fetch_page(&session, path, &options).await?;
        debug!(
            "Fetched listing {} ({} children, after {:?})",
            path,
            data.children.len(),
            data.after
        );
        Ok(Self {
            session,
            source: Some(Source {
                path: path.to_string(),
                options,
            }),
            data,
            link_id: None,
        })
    }

    /// Wrap an already-received `Listing` thing, e.g. a comment's `replies`.
    ///
    /// `link_id` enables "more" expansion within that thread.
    pub fn from_raw(session: Arc<Session>, value: Value, link_id: Option<String>) -> Result<Self> {
        Ok(Self {
            session,
            source: None,
            data: listing_data(value)?,
            link_id,
        })
    }

    pub fn after(&self) -> Option<&str> {
        self.data.after.as_deref()
    }

    pub fn before(&self) -> Option<&str> {
        self.data.before.as_deref()
    }

    /// Number of things on the fetched page, placeholders included
    pub fn len(&self) -> usize {
        self.data.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.children.is_empty()
    }

    pub fn link_id(&self) -> Option<&str> {
        self.link_id.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.path.as_str())
    }

    pub fn children(&self) -> &[RawThing] {
        &self.data.children
    }

    pub fn first(&self) -> Option<Item> {
        self.data
            .children
            .first()
            .map(|raw| Item::from_raw(Arc::clone(&self.session), raw.clone()))
    }

    /// Items of the fetched page only; no fetches, no expansion
    pub fn page(&self) -> impl Iterator<Item = Item> + '_ {
        self.data
            .children
            .iter()
            .map(|raw| Item::from_raw(Arc::clone(&self.session), raw.clone()))
    }

    /// Walk every page from the start
    pub fn iter(&self) -> ListingIterator {
        self.start_at(0)
    }

    /// Walk every page, starting at `index` of the fetched page
    pub fn start_at(&self, index: usize) -> ListingIterator {
        ListingIterator::new(
            Arc::clone(&self.session),
            self.source.clone(),
            self.link_id.clone(),
            self.data.clone(),
            index,
        )
    }

    pub fn into_iter_at(self, index: usize) -> ListingIterator {
        ListingIterator::new(self.session, self.source, self.link_id, self.data, index)
    }
}

/// GET one page and unwrap its `Listing` envelope
pub(crate) async fn fetch_page(session: &Session, path: &str, query: &Params) -> Result<ListingData> {
    let value = session
        .fetch_json(path, query, ResponseFormat::Json)
        .await?
        .into_json()?;
    listing_data(value)
}

fn listing_data(value: Value) -> Result<ListingData> {
    let raw: RawThing = serde_json::from_value(value)?;
    if raw.kind != Kind::Listing {
        return Err(Error::unexpected_kind(Kind::Listing.as_str(), raw.kind.as_str()));
    }
    Ok(serde_json::from_value(raw.data)?)
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
    fn test_from_raw() {
        let listing = Listing::from_raw(
            session(),
            json!({"kind": "Listing", "data": {"after": null, "children": [
                {"kind": "t1", "data": {"name": "t1_a", "body": "x"}},
                {"kind": "t4", "data": {"name": "t4_b"}}
            ]}}),
            Some("t3_link".to_string()),
        )
        .unwrap();

        assert_eq!(listing.len(), 2);
        assert_eq!(listing.after(), None);
        assert_eq!(listing.link_id(), Some("t3_link"));
        assert_eq!(listing.path(), None);
        assert!(matches!(listing.first(), Some(Item::Comment(_))));

        let names: Vec<_> = listing.page().filter_map(|i| i.name().map(str::to_string)).collect();
        assert_eq!(names, vec!["t1_a", "t4_b"]);
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let err = Listing::from_raw(session(), json!({"kind": "t1", "data": {}}), None).unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedKind { ref expected, ref found } if expected == "Listing" && found == "t1"
        ));
    }

    #[test]
    fn test_empty_replies_string_rejected() {
        assert!(Listing::from_raw(session(), json!(""), None).is_err());
    }
}
