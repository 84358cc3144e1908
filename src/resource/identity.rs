//! Identity values of remote resources.
//!
//! REST APIs identify resources by integers, opaque strings or UUIDs. The
//! `id` attribute of a fetched object is read into a [`ResourceId`], which is
//! what nested lookups put under `<owner>_id`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Identity of a resource instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// Numeric identifier
    Int(i64),
    /// Numeric identifier above `i64::MAX`
    UInt(u64),
    /// UUID identifier, read only from its canonical hyphenated lowercase form
    Uuid(Uuid),
    /// Any other string identifier
    Str(String),
}

impl ResourceId {
    /// Read an identity out of a JSON attribute value.
    ///
    /// Returns `None` for `null`, empty strings, and values that cannot
    /// identify a resource (objects, arrays, booleans, fractional numbers).
    ///
    /// A string only becomes [`ResourceId::Uuid`] when writing the UUID back
    /// gives the same text, so `to_value` never changes the identity sent to
    /// the remote.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(ResourceId::Int)
                .or_else(|| n.as_u64().map(ResourceId::UInt)),
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(match Uuid::parse_str(s) {
                Ok(uuid) if uuid.hyphenated().to_string() == *s => ResourceId::Uuid(uuid),
                _ => ResourceId::Str(s.clone()),
            }),
            _ => None,
        }
    }

    /// The identity as a JSON value, suitable for request parameters
    pub fn to_value(&self) -> Value {
        match self {
            ResourceId::Int(i) => Value::from(*i),
            ResourceId::UInt(i) => Value::from(*i),
            ResourceId::Uuid(uuid) => Value::String(uuid.to_string()),
            ResourceId::Str(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Int(i) => write!(f, "{}", i),
            ResourceId::UInt(i) => write!(f, "{}", i),
            ResourceId::Uuid(uuid) => write!(f, "{}", uuid),
            ResourceId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        ResourceId::Int(id)
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        match i64::try_from(id) {
            Ok(id) => ResourceId::Int(id),
            Err(_) => ResourceId::UInt(id),
        }
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        ResourceId::Int(i64::from(id))
    }
}

impl From<Uuid> for ResourceId {
    fn from(id: Uuid) -> Self {
        ResourceId::Uuid(id)
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        ResourceId::Str(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Str(id.to_string())
    }
}
