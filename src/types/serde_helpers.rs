//! Custom serde helpers for browser-exported cookie records
//!
//! Cookie files come from different exporters (DevTools, puppeteer, hand
//! edits) that disagree on how flags and expiry are spelled.

use crate::cookies::Expiry;
use serde::{Deserialize, Deserializer, de};

/// Deserialize a flexible boolean value that can be:
/// - JSON boolean: `true`, `false`
/// - Integer: `0` (false), positive integers (true), negative integers (false)
/// - String: `"0"`, `"1"`, `"false"`, `"true"` (case-insensitive)
/// - `null` or absent: `None`
pub fn deserialize_flexible_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlexibleBool {
        Bool(bool),
        Int(i64),
        String(String),
    }

    let value: Option<FlexibleBool> = Option::deserialize(deserializer)?;

    match value {
        None => Ok(None),
        Some(FlexibleBool::Bool(b)) => Ok(Some(b)),
        Some(FlexibleBool::Int(i)) => Ok(Some(i > 0)),
        Some(FlexibleBool::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            _ => Err(de::Error::custom(format!("invalid boolean string: {}", s))),
        },
    }
}

/// Like [`deserialize_flexible_bool`], with `null` meaning `false`
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_flexible_bool(deserializer)?.unwrap_or(false))
}

/// `expires` as stored by browsers: epoch seconds, with `-1` for session cookies
pub mod expiry {
    use super::*;
    use serde::Serializer;

    pub fn serialize<S>(expiry: &Expiry, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match expiry {
            Expiry::Session => serializer.serialize_i64(-1),
            Expiry::At(secs) => serializer.serialize_f64(*secs),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Expiry, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawExpiry {
            Number(f64),
            String(String),
        }

        match Option::<RawExpiry>::deserialize(deserializer)? {
            None => Ok(Expiry::Session),
            Some(RawExpiry::Number(secs)) if secs < 0.0 => Ok(Expiry::Session),
            Some(RawExpiry::Number(secs)) => Ok(Expiry::At(secs)),
            Some(RawExpiry::String(s)) if s.eq_ignore_ascii_case("session") => Ok(Expiry::Session),
            Some(RawExpiry::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(|secs| if secs < 0.0 { Expiry::Session } else { Expiry::At(secs) })
                .map_err(|_| de::Error::custom(format!("invalid cookie expiry: {}", s))),
        }
    }
}
