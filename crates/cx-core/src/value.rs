//! Metadata values and their JSON encoding
//!
//! Policy documents and rendered attributes go through [`encode_value`], which
//! maps addresses to their canonical string and timestamps to ISO-8601.

use crate::address::ContentAddress;
use crate::error::{CourseExportError, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};
use serde::Serialize;
use std::collections::BTreeMap;

/// Metadata map attached to a content node
pub type Metadata = BTreeMap<String, MetadataValue>;

/// A point in time, with or without timezone information
#[derive(Debug, Clone, PartialEq)]
pub enum Timestamp {
    /// UTC-aware, no explicit offset recorded
    Utc(NaiveDateTime),
    /// Carries an explicit offset
    Offset(DateTime<FixedOffset>),
    /// No timezone information
    Local(NaiveDateTime),
}

impl Timestamp {
    /// ISO-8601 rendering: `Z` for bare UTC, `+HH:MM` for explicit offsets
    pub fn to_iso8601(&self) -> String {
        match self {
            Timestamp::Utc(naive) => format!("{}Z", iso_naive(naive)),
            Timestamp::Offset(dt) => {
                format!("{}{}", iso_naive(&dt.naive_local()), dt.format("%:z"))
            }
            Timestamp::Local(naive) => iso_naive(naive),
        }
    }
}

/// `YYYY-MM-DDTHH:MM:SS`, with microseconds only when non-zero
fn iso_naive(naive: &NaiveDateTime) -> String {
    let micros = naive.nanosecond() / 1_000;
    if micros == 0 {
        naive.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        format!("{}.{:06}", naive.format("%Y-%m-%dT%H:%M:%S"), micros)
    }
}

/// Value stored in node metadata
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Address(ContentAddress),
    Timestamp(Timestamp),
    List(Vec<MetadataValue>),
    Map(BTreeMap<String, MetadataValue>),
}

impl MetadataValue {
    /// Whether the value renders as a single scalar token
    pub fn is_scalar(&self) -> bool {
        !matches!(self, MetadataValue::List(_) | MetadataValue::Map(_))
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::String(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        MetadataValue::String(s)
    }
}

impl From<bool> for MetadataValue {
    fn from(b: bool) -> Self {
        MetadataValue::Bool(b)
    }
}

impl From<i64> for MetadataValue {
    fn from(n: i64) -> Self {
        MetadataValue::Integer(n)
    }
}

impl From<f64> for MetadataValue {
    fn from(n: f64) -> Self {
        MetadataValue::Float(n)
    }
}

impl From<ContentAddress> for MetadataValue {
    fn from(a: ContentAddress) -> Self {
        MetadataValue::Address(a)
    }
}

impl From<Timestamp> for MetadataValue {
    fn from(t: Timestamp) -> Self {
        MetadataValue::Timestamp(t)
    }
}

impl From<serde_json::Value> for MetadataValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => MetadataValue::Null,
            Value::Bool(b) => MetadataValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => MetadataValue::Integer(i),
                None => MetadataValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => MetadataValue::String(s),
            Value::Array(items) => {
                MetadataValue::List(items.into_iter().map(MetadataValue::from).collect())
            }
            Value::Object(map) => MetadataValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, MetadataValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Encode a metadata value as JSON
pub fn encode_value(value: &MetadataValue) -> Result<serde_json::Value> {
    use serde_json::Value;
    Ok(match value {
        MetadataValue::Null => Value::Null,
        MetadataValue::Bool(b) => Value::Bool(*b),
        MetadataValue::Integer(n) => Value::from(*n),
        MetadataValue::Float(n) => serde_json::Number::from_f64(*n)
            .map(Value::Number)
            .ok_or_else(|| {
                CourseExportError::UnsupportedValue(format!("non-finite number {}", n))
            })?,
        MetadataValue::String(s) => Value::String(s.clone()),
        MetadataValue::Address(a) => Value::String(a.encode()),
        MetadataValue::Timestamp(t) => Value::String(t.to_iso8601()),
        MetadataValue::List(items) => Value::Array(
            items
                .iter()
                .map(encode_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        MetadataValue::Map(map) => Value::Object(encode_map(map)?),
    })
}

/// Encode a metadata map as a JSON object
pub fn encode_map(map: &BTreeMap<String, MetadataValue>) -> Result<serde_json::Map<String, serde_json::Value>> {
    map.iter()
        .map(|(k, v)| Ok((k.clone(), encode_value(v)?)))
        .collect()
}

/// Encode a value as the text of an XML attribute
///
/// Strings are used verbatim; everything else is its JSON text.
pub fn encode_attribute(value: &MetadataValue) -> Result<String> {
    match encode_value(value)? {
        serde_json::Value::String(s) => Ok(s),
        other => Ok(serde_json::to_string(&other)?),
    }
}

/// Serialize anything to a compact JSON string
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}
