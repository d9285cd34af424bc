//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests: settings
//! pointed at a mock site, a canned logged-in HTML shell and listing builders.

#![allow(dead_code)]

/// Test helper functions
pub mod helpers {
    use reddit_web_session::{Cookie, Session, Settings};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use wiremock::MockServer;

    pub const BEARER: &str = "bearer-token-123";
    pub const SESSION_TRACKER: &str = "tracker-456";
    pub const LOID: &str = "0000000000abc.2.1686000000000.Z0FBQUFB";

    /// Settings routing every dialect to `server`, with instant retries
    pub fn create_test_settings(server: &MockServer) -> Settings {
        let mut settings = Settings::default().with_origin(server.uri());
        settings.site.cookie_domain = "127.0.0.1".to_string();
        settings.listing.retry_delay_ms = 0;
        settings
    }

    /// Session with a logged-in `reddit_session` cookie
    pub fn create_test_session(server: &MockServer) -> Arc<Session> {
        let settings = create_test_settings(server);
        let cookies = vec![Cookie::new("reddit_session", "logged-in", "127.0.0.1")];
        Arc::new(Session::new(settings, cookies).unwrap())
    }

    /// HTML shell embedding the session JSON the way the site does
    pub fn shell_html() -> String {
        let data = json!({
            "user": {
                "loid": {
                    "loid": "0000000000abc",
                    "version": 2,
                    "created": 1686000000000u64,
                    "blob": "Z0FBQUFB"
                },
                "sessionTracker": SESSION_TRACKER,
                "session": { "accessToken": BEARER, "expiresIn": 86400 }
            }
        });
        format!(
            "<!DOCTYPE html><html><head><title>reddit</title></head><body>\
             <div id=\"app\"></div>\
             <script id=\"data\">window.___r = {};</script>\
             </body></html>",
            data
        )
    }

    pub fn thing(kind: &str, name: &str) -> Value {
        json!({ "kind": kind, "data": { "name": name, "body": format!("body of {}", name) } })
    }

    pub fn more(children: &[&str]) -> Value {
        json!({ "kind": "more", "data": { "count": children.len(), "children": children } })
    }

    pub fn listing(children: Vec<Value>, after: Option<&str>) -> Value {
        json!({ "kind": "Listing", "data": { "after": after, "before": null, "children": children } })
    }

    /// `json.data.things` envelope of the batch children endpoint
    pub fn more_children_response(things: Vec<Value>) -> Value {
        json!({ "json": { "errors": [], "data": { "things": things } } })
    }
}
