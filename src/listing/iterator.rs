//! Lazy listing traversal
//!
//! [`ListingIterator`] is an explicit state machine:
//!
//! - `Yielding` pops the next raw thing off the frame stack. The bottom frame
//!   is the current page; frames above it hold "more" expansions still being
//!   emitted, so expansion is depth-first and left-to-right.
//! - `ExpandingMore` resolves one placeholder through the batch children call
//!   and pushes the result as a new frame.
//! - `Fetching` requests the next page with the `after` cursor.
//! - `Exhausted` ends the sequence.
//!
//! A state only changes once its request has resolved, so a `next()` future
//! dropped by a caller's deadline loses nothing.
//!
//! A failed fetch or expansion is logged and retried on the next call after
//! the configured delay. Once `listing.max_consecutive_failures` failures
//! happen in a row the iterator returns [`Error::ListingAborted`] a single
//! time and is exhausted afterwards.

use super::{Source, fetch_page};
use crate::items::Item;
use crate::session::Session;
use crate::types::{ListingData, MoreData, Params, RawThing};
use crate::{Error, Result};
use futures::Stream;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Query key carrying the pagination cursor
pub const CURSOR_KEY: &str = "after";

#[derive(Debug, Clone, PartialEq)]
enum State {
    Yielding,
    ExpandingMore(Vec<String>),
    Fetching,
    Exhausted,
}

/// Cursor over every item of a listing, across pages
#[derive(Debug)]
pub struct ListingIterator {
    session: Arc<Session>,
    source: Option<Source>,
    /// Query of the next fetch; only `after` is ever rewritten
    query: Params,
    link_id: Option<String>,
    after: Option<String>,
    frames: Vec<VecDeque<RawThing>>,
    state: State,
    failures: u32,
    last_name: Option<String>,
    /// Set after a refetch until the new page's first thing has been looked at
    at_page_boundary: bool,
}

impl ListingIterator {
    pub(crate) fn new(
        session: Arc<Session>,
        source: Option<Source>,
        link_id: Option<String>,
        data: ListingData,
        index: usize,
    ) -> Self {
        let query = source
            .as_ref()
            .map(|s| s.options.clone())
            .unwrap_or_default();
        let page: VecDeque<RawThing> = data.children.into_iter().skip(index).collect();

        Self {
            session,
            source,
            query,
            link_id,
            after: data.after,
            frames: vec![page],
            state: State::Yielding,
            failures: 0,
            last_name: None,
            at_page_boundary: false,
        }
    }

    /// Next item, `Ok(None)` once the listing is exhausted.
    ///
    /// Dropping the returned future mid-request leaves the pending fetch or
    /// expansion in place; the next call issues it again.
    pub async fn next(&mut self) -> Result<Option<Item>> {
        loop {
            match &self.state {
                State::Exhausted => return Ok(None),

                State::Yielding => {
                    let Some(raw) = self.pop_frame() else {
                        self.state = self.after_page();
                        continue;
                    };

                    let boundary = std::mem::take(&mut self.at_page_boundary);
                    if raw.is_more() {
                        self.enter_more(raw);
                        continue;
                    }
                    if boundary && raw.name().is_some() && raw.name() == self.last_name.as_deref() {
                        debug!("Skipping repeated boundary item {:?}", self.last_name);
                        continue;
                    }

                    if let Some(name) = raw.name() {
                        self.last_name = Some(name.to_string());
                    }
                    return Ok(Some(Item::from_raw(Arc::clone(&self.session), raw)));
                }

                State::ExpandingMore(children) => {
                    let children = children.clone();
                    let link_id = self.link_id.clone().unwrap_or_default();
                    match self.session.more_children(&link_id, &children).await {
                        Ok(things) => {
                            debug!("Expanded {} ids into {} things", children.len(), things.len());
                            self.failures = 0;
                            self.frames.push(things.into());
                            self.state = State::Yielding;
                        }
                        Err(err) => self.record_failure(err).await?,
                    }
                }

                State::Fetching => {
                    let Some(source) = self.source.clone() else {
                        self.state = State::Exhausted;
                        continue;
                    };
                    if let Some(after) = &self.after {
                        self.query.set(CURSOR_KEY, after);
                    }
                    match fetch_page(&self.session, &source.path, &self.query).await {
                        Ok(data) => {
                            info!(
                                "Fetched next page of {} ({} children, after {:?})",
                                source.path,
                                data.children.len(),
                                data.after
                            );
                            self.failures = 0;
                            self.after = data.after;
                            self.frames.push(data.children.into());
                            self.at_page_boundary = true;
                            self.state = State::Yielding;
                        }
                        Err(err) => self.record_failure(err).await?,
                    }
                }
            }
        }
    }

    /// Adapt into a `Stream`; an abort is yielded as the final `Err`
    pub fn into_stream(self) -> impl Stream<Item = Result<Item>> {
        futures::stream::unfold(self, |mut iter| async move {
            match iter.next().await {
                Ok(Some(item)) => Some((Ok(item), iter)),
                Ok(None) => None,
                Err(err) => Some((Err(err), iter)),
            }
        })
    }

    /// Drain every remaining item
    pub async fn collect(mut self) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted
    }

    fn pop_frame(&mut self) -> Option<RawThing> {
        while let Some(frame) = self.frames.last_mut() {
            if let Some(raw) = frame.pop_front() {
                return Some(raw);
            }
            self.frames.pop();
        }
        None
    }

    /// Continue with the next page, or stop at the terminal page
    fn after_page(&self) -> State {
        match (&self.source, &self.after) {
            (Some(_), Some(_)) => State::Fetching,
            _ => State::Exhausted,
        }
    }

    fn enter_more(&mut self, raw: RawThing) {
        if self.link_id.is_none() {
            debug!("Skipping \"more\" placeholder outside a thread");
            return;
        }
        let children = match serde_json::from_value::<MoreData>(raw.data) {
            Ok(more) => more.children,
            Err(err) => {
                warn!("Skipping unreadable \"more\" placeholder: {}", err);
                return;
            }
        };
        if !children.is_empty() {
            self.state = State::ExpandingMore(children);
        }
    }

    async fn record_failure(&mut self, err: Error) -> Result<()> {
        self.failures += 1;
        let settings = &self.session.settings().listing;
        let path = self
            .source
            .as_ref()
            .map(|s| s.path.clone())
            .unwrap_or_else(|| "<embedded listing>".to_string());

        if self.failures >= settings.max_consecutive_failures {
            warn!("Listing {} giving up after {} failures: {}", path, self.failures, err);
            self.state = State::Exhausted;
            return Err(Error::listing_aborted(path, self.failures, &err));
        }

        warn!(
            "Listing {} failed ({}/{}), retrying: {}",
            path, self.failures, settings.max_consecutive_failures, err
        );
        tokio::time::sleep(settings.retry_delay()).await;
        Ok(())
    }
}
