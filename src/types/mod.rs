//! Type definitions for the session client
//!
//! Wire records, request parameters, decoded bodies and handshake credentials.

pub mod internal;
pub mod request;
pub mod response;
pub mod serde_helpers;
pub mod thing;

pub use internal::SessionCredentials;
pub use request::Params;
pub use response::{Payload, ResponseFormat};
pub use thing::{Kind, ListingData, MoreData, RawThing};
