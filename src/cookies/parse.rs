//! `Set-Cookie` parsing
//!
//! The header grammar and cookie dates are handled by the `cookie` crate;
//! this module maps the result onto the jar's [`Cookie`] record. Only
//! `Domain`, `Path`, `Expires`, `Max-Age`, `Secure`, `Partitioned` and
//! `SameSite` are kept. Anything else is dropped, as are attributes whose
//! value does not parse.

use super::cookie::{Cookie, Expiry};
use crate::{Error, Result};
use ::cookie::{Cookie as SetCookie, SameSite};

/// Parse one `Set-Cookie` header value.
///
/// `default_domain` is used when the header carries no `Domain`, and `now`
/// anchors `Max-Age`. An empty value is returned as-is: the jar treats it as
/// a deletion.
pub fn parse_set_cookie(raw: &str, default_domain: &str, now: f64) -> Result<Cookie> {
    let parsed = SetCookie::parse(raw).map_err(|e| Error::malformed_cookie(raw, e.to_string()))?;

    let mut cookie = Cookie::new(parsed.name(), parsed.value(), default_domain);

    // Stored in the dotted form browser exports use for domain cookies
    if let Some(domain) = parsed.domain().map(|d| d.trim_start_matches('.')).filter(|d| !d.is_empty()) {
        cookie.domain = format!(".{}", domain.to_ascii_lowercase());
    }
    if let Some(path) = parsed.path().filter(|p| !p.is_empty()) {
        cookie.path = path.to_string();
    }

    // Max-Age wins over Expires
    if let Some(max_age) = parsed.max_age() {
        cookie.expires = Expiry::after(now, max_age.whole_seconds() as f64);
    } else if let Some(at) = parsed.expires().and_then(|e| e.datetime()) {
        cookie.expires = Expiry::At(at.unix_timestamp() as f64);
    }

    if parsed.secure() == Some(true) {
        cookie.secure = true;
    }
    if parsed.partitioned() == Some(true) {
        cookie.partitioned = true;
    }
    cookie.same_site = parsed.same_site().map(|same_site| {
        match same_site {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
        .to_string()
    });

    Ok(cookie)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DOMAIN: &str = ".reddit.com";

    #[test]
    fn test_name_value_with_defaults() {
        let cookie = parse_set_cookie("session_id=xyz", DOMAIN, 0.0).unwrap();
        assert_eq!(cookie.name, "session_id");
        assert_eq!(cookie.value, "xyz");
        assert_eq!(cookie.domain, DOMAIN);
        assert_eq!(cookie.path, "/");
        assert_eq!(cookie.expires, Expiry::Session);
        assert!(!cookie.secure);
    }

    #[test]
    fn test_value_may_contain_equals() {
        let cookie = parse_set_cookie("token=a=b==; Path=/", DOMAIN, 0.0).unwrap();
        assert_eq!(cookie.value, "a=b==");
    }

    #[test]
    fn test_all_recognised_attributes() {
        let cookie = parse_set_cookie(
            "edgebucket=q1; Domain=www.reddit.com; Path=/r; Secure; Partitioned; SameSite=None",
            DOMAIN,
            0.0,
        )
        .unwrap();
        assert_eq!(cookie.domain, ".www.reddit.com");
        assert_eq!(cookie.path, "/r");
        assert!(cookie.secure);
        assert!(cookie.partitioned);
        assert_eq!(cookie.same_site.as_deref(), Some("None"));
    }

    #[test]
    fn test_dotted_domain_is_kept_dotted() {
        let cookie = parse_set_cookie("loid=abc; Domain=.reddit.com", "127.0.0.1", 0.0).unwrap();
        assert_eq!(cookie.domain, ".reddit.com");
    }

    #[rstest]
    #[case("loid=abc; Max-Age=3600")]
    #[case("loid=abc; max-age=3600")]
    #[case("loid=abc; MAX-AGE=3600")]
    fn test_max_age_case_insensitive(#[case] raw: &str) {
        let cookie = parse_set_cookie(raw, DOMAIN, 1000.0).unwrap();
        assert_eq!(cookie.expires, Expiry::At(4600.0));
    }

    #[test]
    fn test_max_age_wins_over_expires() {
        let raw = "csv=2; Expires=Wed, 21 Oct 2015 07:28:00 GMT; Max-Age=60";
        let cookie = parse_set_cookie(raw, DOMAIN, 1000.0).unwrap();
        assert_eq!(cookie.expires, Expiry::At(1060.0));
    }

    #[rstest]
    #[case("Wed, 21 Oct 2015 07:28:00 GMT")]
    #[case("Wed, 21-Oct-2015 07:28:00 GMT")]
    fn test_expires_formats(#[case] date: &str) {
        let raw = format!("csv=2; Expires={}", date);
        let cookie = parse_set_cookie(&raw, DOMAIN, 0.0).unwrap();
        assert_eq!(cookie.expires, Expiry::At(1445412480.0));
    }

    #[rstest]
    #[case("a=1; Max-Age=NaN")]
    #[case("a=1; Max-Age=inf")]
    #[case("a=1; Max-Age=soon")]
    #[case("a=1; Expires=someday")]
    fn test_unparseable_lifetime_is_ignored(#[case] raw: &str) {
        let cookie = parse_set_cookie(raw, DOMAIN, 0.0).unwrap();
        assert_eq!(cookie.value, "1");
        assert_eq!(cookie.expires, Expiry::Session);
    }

    #[test]
    fn test_negative_max_age_expires_immediately() {
        let cookie = parse_set_cookie("a=1; Max-Age=-5", DOMAIN, 100.0).unwrap();
        assert!(cookie.expires.is_expired(100.0));
    }

    #[test]
    fn test_unknown_attributes_are_dropped() {
        // Unknown keys must not leak into the record under any name
        let cookie = parse_set_cookie("a=b; HttpOnly; Priority=High; Foo=bar", DOMAIN, 0.0).unwrap();
        let expected = Cookie::new("a", "b", DOMAIN);
        assert_eq!(cookie, expected);
        assert!(cookie.extra.is_empty());
    }

    #[test]
    fn test_host_prefix_implies_secure() {
        let cookie = parse_set_cookie("__Host-token=t", DOMAIN, 0.0).unwrap();
        assert!(cookie.secure);
    }

    #[test]
    fn test_empty_value_parses() {
        let cookie = parse_set_cookie("reddit_session=; Max-Age=0", DOMAIN, 10.0).unwrap();
        assert!(cookie.value.is_empty());
    }

    #[rstest]
    #[case("novalue")]
    #[case("=orphan")]
    fn test_malformed_headers(#[case] raw: &str) {
        let err = parse_set_cookie(raw, DOMAIN, 0.0).unwrap_err();
        assert!(matches!(err, Error::MalformedCookie { .. }), "{}", raw);
    }
}
