// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events recorded by the bus

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arbitrary payload fields of an event
pub type Fields = serde_json::Map<String, Value>;

/// Reserved payload key holding event metadata
pub const META_KEY: &str = "meta";

/// Event metadata
///
/// `event_type` is always set by the bus. `cid` and `cts` are stamped when
/// the bus profile asks for them; any other keys a caller put in `meta` are
/// carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cts: Option<i64>,
    #[serde(flatten)]
    pub extra: Fields,
}

impl Meta {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            cid: None,
            cts: None,
            extra: Fields::new(),
        }
    }
}

/// A recorded event: payload fields plus `meta`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub meta: Meta,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Event {
    /// Build an event from a payload, forcing `meta.type`
    ///
    /// The payload is copied one level deep. A caller-supplied `meta` object
    /// keeps its fields, only `type` is overwritten; a `meta` value that is
    /// not an object is dropped. A `cid` that is not a string or a `cts`
    /// that is not an integer is dropped too.
    pub fn from_payload(event_type: impl Into<String>, payload: impl Into<Payload>) -> Self {
        let mut fields = payload.into().0;
        let mut meta = Meta::new(event_type);

        if let Some(Value::Object(supplied)) = fields.remove(META_KEY) {
            for (key, value) in supplied {
                match (key.as_str(), value) {
                    ("type", _) => {}
                    ("cid", Value::String(cid)) => meta.cid = Some(cid),
                    ("cts", Value::Number(n)) => meta.cts = n.as_i64(),
                    // Mistyped stamps are dropped, the profile may refill them
                    ("cid", _) | ("cts", _) => {}
                    (name, value) => {
                        meta.extra.insert(name.to_string(), value);
                    }
                }
            }
        }

        Self { meta, fields }
    }

    /// The event type (`meta.type`)
    pub fn event_type(&self) -> &str {
        &self.meta.event_type
    }

    /// Look up a payload field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Render the event as a JSON object
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Payload accepted by `emit`
///
/// Anything convertible into a JSON object. Non-object values carry no
/// fields and produce an event with only `meta`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(pub Fields);

impl Payload {
    pub fn empty() -> Self {
        Self::default()
    }
}

impl From<()> for Payload {
    fn from(_: ()) -> Self {
        Self::empty()
    }
}

impl From<Fields> for Payload {
    fn from(fields: Fields) -> Self {
        Self(fields)
    }
}

impl From<&Fields> for Payload {
    fn from(fields: &Fields) -> Self {
        Self(fields.clone())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::empty(),
        }
    }
}

impl From<&Value> for Payload {
    fn from(value: &Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields.clone()),
            _ => Self::empty(),
        }
    }
}

impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(payload: Option<T>) -> Self {
        payload.map(Into::into).unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
