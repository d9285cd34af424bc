//! Response body types
//!
//! Callers pick how a response body is decoded; non-2xx bodies never reach here.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// How to decode a successful response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Text,
}

/// A decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// JSON body; a text payload is parsed on demand
    pub fn into_json(self) -> Result<Value> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Text(text) => Ok(serde_json::from_str(&text)?),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Json(value) => value.to_string(),
            Self::Text(text) => text,
        }
    }

    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.into_json()?)?)
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

impl TryFrom<Payload> for Value {
    type Error = Error;

    fn try_from(payload: Payload) -> Result<Self> {
        payload.into_json()
    }
}
