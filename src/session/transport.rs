//! Shared request plumbing
//!
//! Cookie header attachment, `Set-Cookie` collection and status checking used
//! by the dialects and both handshakes.

use crate::cookies::CookieJar;
use crate::types::{Payload, ResponseFormat};
use crate::{Error, Result};
use reqwest::header::{COOKIE, HeaderMap, SET_COOKIE};
use reqwest::{RequestBuilder, Response, StatusCode};
use tokio::sync::RwLock;
use tracing::debug;

/// Status and `Set-Cookie` values of a response whose body is not read yet
pub(crate) struct Received {
    pub status: StatusCode,
    pub set_cookies: Vec<String>,
    pub response: Response,
}

/// Attach the jar's (freshly pruned) cookie header and send
pub(crate) async fn send_with_cookies(
    jar: &RwLock<CookieJar>,
    path: &str,
    builder: RequestBuilder,
) -> Result<Received> {
    let cookie_header = jar.write().await.prepare_header();
    let builder = if cookie_header.is_empty() {
        builder
    } else {
        builder.header(COOKIE, cookie_header)
    };

    let response = builder
        .send()
        .await
        .map_err(|e| Error::from_reqwest(path, e))?;

    let received = Received {
        status: response.status(),
        set_cookies: set_cookie_values(response.headers()),
        response,
    };
    debug!(
        "{} -> {} ({} Set-Cookie)",
        path,
        received.status,
        received.set_cookies.len()
    );
    Ok(received)
}

pub(crate) fn set_cookie_values(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}

pub(crate) fn ensure_success(path: &str, status: StatusCode) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    Err(Error::transport(
        path,
        Some(status.as_u16()),
        status.canonical_reason().unwrap_or("unexpected status"),
    ))
}

pub(crate) async fn read_text(path: &str, response: Response) -> Result<String> {
    response.text().await.map_err(|e| Error::from_reqwest(path, e))
}

/// Decode a successful body; an empty JSON body reads as `null`
pub(crate) async fn decode(path: &str, response: Response, format: ResponseFormat) -> Result<Payload> {
    let text = read_text(path, response).await?;
    match format {
        ResponseFormat::Text => Ok(Payload::Text(text)),
        ResponseFormat::Json if text.trim().is_empty() => Ok(Payload::Json(serde_json::Value::Null)),
        ResponseFormat::Json => Ok(Payload::Json(serde_json::from_str(&text)?)),
    }
}
