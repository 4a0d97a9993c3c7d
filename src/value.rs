//! The dynamically-shaped values the engine conforms.
//!
//! This module provides [`Value`], a tagged sum covering every shape the
//! engine can inspect, along with [`Key`] for mapping keys and
//! [`ValueType`] for runtime type identity.

use std::any::Any;
use std::fmt::{self, Display};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// A mapping key, either symbolic or textual.
///
/// The two variants are distinct: a definition that demands a symbolic
/// key never matches a textual input key and vice versa, even when the
/// underlying names are equal.
///
/// # Example
///
/// ```rust
/// use conformal::Key;
///
/// assert_ne!(Key::sym("name"), Key::text("name"));
/// assert_eq!(Key::sym("name").name(), "name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A symbolic key (e.g. `:name`).
    Sym(String),
    /// A textual key (e.g. `"name"`).
    Text(String),
}

impl Key {
    /// Creates a symbolic key.
    pub fn sym(name: impl Into<String>) -> Self {
        Key::Sym(name.into())
    }

    /// Creates a textual key.
    pub fn text(name: impl Into<String>) -> Self {
        Key::Text(name.into())
    }

    /// Returns the key name without variant decoration.
    pub fn name(&self) -> &str {
        match self {
            Key::Sym(s) | Key::Text(s) => s,
        }
    }

    /// Returns true for symbolic keys.
    pub fn is_sym(&self) -> bool {
        matches!(self, Key::Sym(_))
    }

    /// Returns true for textual keys.
    pub fn is_text(&self) -> bool {
        matches!(self, Key::Text(_))
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Sym(s) => write!(f, ":{}", s),
            Key::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Runtime type identity of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Bool,
    Int,
    Float,
    Text,
    Time,
    Bytes,
    Seq,
    Map,
    /// A user-defined nominal type, identified by its type id.
    Custom(&'static str),
}

impl ValueType {
    /// Returns the human-readable type name used in error arguments.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Null => "nil",
            ValueType::Bool => "boolean",
            ValueType::Int => "integer",
            ValueType::Float => "float",
            ValueType::Text => "string",
            ValueType::Time => "time",
            ValueType::Bytes => "bytes",
            ValueType::Seq => "sequence",
            ValueType::Map => "mapping",
            ValueType::Custom(id) => id,
        }
    }

    /// Returns true for the primitive types that support coercion:
    /// boolean, integer, float and string.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            ValueType::Bool | ValueType::Int | ValueType::Float | ValueType::Text
        )
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An opaque user-defined value carrying a nominal type id.
///
/// Equality is nominal-plus-identity: two custom values are equal when
/// they share a type id and point at the same payload.
#[derive(Clone)]
pub struct CustomValue {
    type_id: &'static str,
    payload: Arc<dyn Any + Send + Sync>,
}

impl CustomValue {
    /// Wraps a payload under the given nominal type id.
    pub fn new<T: Any + Send + Sync>(type_id: &'static str, payload: T) -> Self {
        Self {
            type_id,
            payload: Arc::new(payload),
        }
    }

    /// Returns the nominal type id.
    pub fn type_id(&self) -> &'static str {
        self.type_id
    }

    /// Downcasts the payload to a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }
}

impl PartialEq for CustomValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && Arc::ptr_eq(&self.payload, &other.payload)
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomValue({})", self.type_id)
    }
}

/// A dynamically-shaped datum: scalar, ordered sequence, or keyed mapping.
///
/// The engine is polymorphic over value shape; definitions inspect the
/// runtime tag only through the capabilities they need (type identity,
/// size, equality, key lookup, indexed iteration).
///
/// # Example
///
/// ```rust
/// use conformal::{Key, Value};
///
/// let v = Value::map([
///     (Key::sym("name"), Value::from("test")),
///     (Key::sym("count"), Value::from(3i64)),
/// ]);
/// assert_eq!(v.as_map().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Time(DateTime<Utc>),
    Bytes(Vec<u8>),
    Seq(Vec<Value>),
    Map(IndexMap<Key, Value>),
    Custom(CustomValue),
}

impl Value {
    /// Builds a sequence value from an iterator of values.
    pub fn seq(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Seq(items.into_iter().collect())
    }

    /// Builds a mapping value from an iterator of key/value pairs.
    pub fn map(entries: impl IntoIterator<Item = (Key, Value)>) -> Self {
        Value::Map(entries.into_iter().collect())
    }

    /// Wraps an opaque payload as a custom value.
    pub fn custom<T: Any + Send + Sync>(type_id: &'static str, payload: T) -> Self {
        Value::Custom(CustomValue::new(type_id, payload))
    }

    /// Returns the runtime type tag.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Text(_) => ValueType::Text,
            Value::Time(_) => ValueType::Time,
            Value::Bytes(_) => ValueType::Bytes,
            Value::Seq(_) => ValueType::Seq,
            Value::Map(_) => ValueType::Map,
            Value::Custom(c) => ValueType::Custom(c.type_id()),
        }
    }

    /// Returns the human-readable type name.
    pub fn type_name(&self) -> &'static str {
        self.value_type().name()
    }

    /// Returns true for the null sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the numeric magnitude for integers and floats.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<Key, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the size of sized values: character count for strings,
    /// element count for sequences, entry count for mappings, byte count
    /// for byte strings.
    pub fn size(&self) -> Option<usize> {
        match self {
            Value::Text(s) => Some(s.chars().count()),
            Value::Bytes(b) => Some(b.len()),
            Value::Seq(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::Time(t) => write!(f, "{}", t.to_rfc3339()),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Value::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                f.write_str("}")
            }
            Value::Custom(c) => write!(f, "<{}>", c.type_id()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

// Value is shared freely across conforming threads.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Value>();
    assert_sync::<Value>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_variants_are_distinct() {
        assert_ne!(Key::sym("a"), Key::text("a"));
        assert_eq!(Key::sym("a"), Key::sym("a"));
        assert_eq!(Key::text("a"), Key::text("a"));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::sym("name").to_string(), ":name");
        assert_eq!(Key::text("name").to_string(), "name");
    }

    #[test]
    fn test_value_type_tags() {
        assert_eq!(Value::Null.value_type(), ValueType::Null);
        assert_eq!(Value::Int(1).value_type(), ValueType::Int);
        assert_eq!(Value::Float(1.0).value_type(), ValueType::Float);
        assert_eq!(Value::from("x").value_type(), ValueType::Text);
        assert_eq!(Value::seq([]).value_type(), ValueType::Seq);
        assert_eq!(Value::map([]).value_type(), ValueType::Map);
    }

    #[test]
    fn test_int_and_float_are_distinct_types() {
        assert_ne!(Value::Int(1).value_type(), Value::Float(1.0).value_type());
    }

    #[test]
    fn test_size() {
        assert_eq!(Value::from("日本語").size(), Some(3));
        assert_eq!(Value::seq([Value::Int(1), Value::Int(2)]).size(), Some(2));
        assert_eq!(Value::Bytes(vec![0, 1, 2]).size(), Some(3));
        assert_eq!(Value::Int(7).size(), None);
    }

    #[test]
    fn test_custom_equality_is_nominal_and_identity() {
        let a = Value::custom("money", 100_i64);
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, Value::custom("money", 100_i64));
    }

    #[test]
    fn test_custom_downcast() {
        let c = CustomValue::new("money", 100_i64);
        assert_eq!(c.downcast_ref::<i64>(), Some(&100));
        assert_eq!(c.downcast_ref::<String>(), None);
    }

    #[test]
    fn test_primitive_types() {
        assert!(ValueType::Int.is_primitive());
        assert!(ValueType::Text.is_primitive());
        assert!(!ValueType::Seq.is_primitive());
        assert!(!ValueType::Time.is_primitive());
        assert!(!ValueType::Custom("money").is_primitive());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "nil");
        assert_eq!(Value::from("hi").to_string(), "\"hi\"");
        assert_eq!(
            Value::seq([Value::Int(1), Value::Int(2)]).to_string(),
            "[1, 2]"
        );
        assert_eq!(
            Value::map([(Key::sym("a"), Value::Int(1))]).to_string(),
            "{:a: 1}"
        );
    }

    #[test]
    fn test_as_number_covers_both_numeric_tags() {
        assert_eq!(Value::Int(3).as_number(), Some(3.0));
        assert_eq!(Value::Float(2.5).as_number(), Some(2.5));
        assert_eq!(Value::from("3").as_number(), None);
    }
}
