//! Reddit Web Session - cookie-session client for Reddit's web API surface
//!
//! Drives the site's unofficial web endpoints as a logged-in browser would:
//! a cookie jar with expiry semantics, the HTML-shell and modhash
//! authentication handshakes, three request dialects and lazily paginated
//! listings of typed items.
//!
//! # Architecture
//!
//! - **Cookies**: [`CookieJar`] parses `Set-Cookie`, renders `Cookie`, prunes
//!   expired entries and persists itself as a JSON array
//! - **Session**: [`Session`] issues public GETs, OAuth bearer POSTs and legacy
//!   modhash form POSTs, re-authenticating per call
//! - **Items**: [`Item`] maps each `{kind, data}` record to a typed wrapper
//!   whose actions run through the owning session
//! - **Listings**: [`Listing`] and [`ListingIterator`] walk every page and
//!   expand "more" placeholders depth-first
//!
//! The login flow producing the initial cookie set is outside this crate;
//! plug it in through [`CookieProvider`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use reddit_web_session::{ConfigLoader, Item, Session, cookies::CookieFile};
//! use reddit_web_session::types::Params;
//! use std::sync::Arc;
//!
//! # async fn example() -> reddit_web_session::Result<()> {
//! let settings = ConfigLoader::new().file("reddit-session.toml").load()?;
//! let session = Arc::new(Session::from_provider(settings, &CookieFile::new("cookies.json")).await?);
//!
//! let mut unread = session.message_unread(Params::new()).await?.iter();
//! while let Some(item) = unread.next().await? {
//!     if let Item::Message(message) = item {
//!         println!("{:?}", message.subject());
//!         message.read().await?;
//!     }
//! }
//!
//! session.save_cookies("cookies.json".as_ref()).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod cookies;
pub mod error;
pub mod items;
pub mod listing;
pub mod session;
pub mod types;
pub mod utils;

pub use api::{SubmitKind, VoteDirection};
pub use config::{ConfigLoader, Settings};
pub use cookies::{Cookie, CookieJar, CookieProvider, Expiry};
pub use error::{Error, Result};
pub use items::Item;
pub use listing::{Listing, ListingIterator};
pub use session::Session;
