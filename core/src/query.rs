//! Query-string construction.
//!
//! Keys keep their insertion order. Absent values (`None`, JSON `null`,
//! empty lists) are dropped, list values expand to one `key=value` pair per
//! element, and every key and value is percent-encoded on its own with the
//! same character set as JavaScript's `encodeURIComponent`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

/// Characters escaped by `encodeURIComponent`: everything but
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// A single query value or a repeated one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    Many(Vec<String>),
}

/// Conversion into an optional query value; `None` means "leave the key out".
pub trait ToQueryValue {
    fn to_query_value(self) -> Option<QueryValue>;
}

/// Types that render as one query string element.
pub trait QueryScalar {
    fn to_query_string(&self) -> String;
}

macro_rules! query_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl QueryScalar for $ty {
                fn to_query_string(&self) -> String {
                    self.to_string()
                }
            }

            impl ToQueryValue for $ty {
                fn to_query_value(self) -> Option<QueryValue> {
                    Some(QueryValue::Single(self.to_query_string()))
                }
            }
        )*
    };
}

query_scalar!(
    &str,
    String,
    &String,
    bool,
    i32,
    i64,
    u32,
    u64,
    usize,
    f64,
    Uuid,
    chrono::NaiveDate,
);

impl ToQueryValue for chrono::DateTime<chrono::Utc> {
    fn to_query_value(self) -> Option<QueryValue> {
        Some(QueryValue::Single(self.to_rfc3339()))
    }
}

impl<T: ToQueryValue> ToQueryValue for Option<T> {
    fn to_query_value(self) -> Option<QueryValue> {
        self.and_then(ToQueryValue::to_query_value)
    }
}

impl<T: QueryScalar> ToQueryValue for Vec<T> {
    fn to_query_value(self) -> Option<QueryValue> {
        self.as_slice().to_query_value()
    }
}

impl<T: QueryScalar> ToQueryValue for &[T] {
    fn to_query_value(self) -> Option<QueryValue> {
        if self.is_empty() {
            return None;
        }
        Some(QueryValue::Many(
            self.iter().map(QueryScalar::to_query_string).collect(),
        ))
    }
}

/// Insertion-ordered query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, QueryValue)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Query::insert`].
    pub fn with(mut self, key: &str, value: impl ToQueryValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key`, replacing an earlier value in place. An absent value
    /// removes the key.
    pub fn insert(&mut self, key: &str, value: impl ToQueryValue) {
        match value.to_query_value() {
            Some(value) => {
                if let Some(slot) = self.pairs.iter_mut().find(|(k, _)| k == key) {
                    slot.1 = value;
                } else {
                    self.pairs.push((key.to_string(), value));
                }
            }
            None => self.pairs.retain(|(k, _)| k != key),
        }
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Flatten a JSON object into query parameters.
    pub fn from_json(value: &Value) -> Result<Self, ApiError> {
        let object = value.as_object().ok_or_else(|| {
            ApiError::Serialization(format!("query must be a JSON object, got {value}"))
        })?;
        let mut query = Query::new();
        for (key, value) in object {
            let value = match value {
                Value::Null => continue,
                Value::Array(items) if items.is_empty() => continue,
                Value::Array(items) => QueryValue::Many(items.iter().map(json_text).collect()),
                other => QueryValue::Single(json_text(other)),
            };
            query.pairs.push((key.clone(), value));
        }
        Ok(query)
    }

    /// Flatten any serializable struct or map into query parameters.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, ApiError> {
        let value =
            serde_json::to_value(value).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Self::from_json(&value)
    }

    /// Render as `k=v&k2=v2` without a leading `?`.
    pub fn encode(&self) -> String {
        let mut out = Vec::new();
        for (key, value) in &self.pairs {
            let key = encode_component(key);
            match value {
                QueryValue::Single(v) => out.push(format!("{key}={}", encode_component(v))),
                QueryValue::Many(values) => {
                    out.extend(
                        values
                            .iter()
                            .map(|v| format!("{key}={}", encode_component(v))),
                    );
                }
            }
        }
        out.join("&")
    }
}

/// Strings render raw, everything else as JSON text.
fn json_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
