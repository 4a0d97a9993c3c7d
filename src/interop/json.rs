//! Conversion between engine values and `serde_json::Value`.
//!
//! Ingestion is total: every JSON document maps to an engine value, with
//! object keys arriving as textual keys and integral numbers as
//! integers. Projection back to JSON is lossy where JSON has no
//! counterpart: times render as RFC 3339 strings, byte strings as number
//! arrays, symbolic keys as plain strings, and custom values as a
//! `"<type-id>"` marker.

use crate::value::{Key, Value};

/// Converts a JSON value into an engine value.
///
/// # Example
///
/// ```rust
/// use conformal::{interop, Key, Value};
/// use serde_json::json;
///
/// let value = interop::from_json(&json!({"name": "ada", "age": 36}));
/// let map = value.as_map().unwrap();
/// assert_eq!(map[&Key::text("name")], Value::from("ada"));
/// assert_eq!(map[&Key::text("age")], Value::Int(36));
/// ```
pub fn from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::Text(s.clone()),
        serde_json::Value::Array(items) => Value::Seq(items.iter().map(from_json).collect()),
        serde_json::Value::Object(entries) => Value::Map(
            entries
                .iter()
                .map(|(k, v)| (Key::text(k), from_json(v)))
                .collect(),
        ),
    }
}

/// Converts an engine value into a JSON value.
///
/// Lossy for shapes JSON cannot express; see the module docs.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::from(*i),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::Time(t) => serde_json::Value::String(t.to_rfc3339()),
        Value::Bytes(b) => serde_json::Value::Array(
            b.iter().map(|byte| serde_json::Value::from(*byte)).collect(),
        ),
        Value::Seq(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Map(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.name().to_string(), to_json(v)))
                .collect(),
        ),
        Value::Custom(c) => serde_json::Value::String(format!("<{}>", c.type_id())),
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        from_json(json)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        from_json(&json)
    }
}
