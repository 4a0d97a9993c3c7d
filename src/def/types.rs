//! Type-identity and coercion definitions.
//!
//! [`Type`] checks the runtime tag of a value exactly; [`CoercibleType`]
//! additionally attempts a primitive coercion when the tag does not
//! match. Coercion is defined only for the primitive types — applying it
//! to anything else is a configuration error caught at build time.

use crate::error::ConformError;
use crate::result::ConformResult;
use crate::value::{Value, ValueType};

use super::{Conform, ConfigError};

/// A definition that requires an exact runtime type.
///
/// Primitive tags match exactly (an integer is never a float); custom
/// values match nominally by type id.
///
/// # Example
///
/// ```rust
/// use conformal::{Conform, Def, Value, ValueType};
///
/// let def = Def::value_type(ValueType::Int);
/// assert!(def.conform(&Value::Int(3)).passed());
/// assert!(def.conform(&Value::Float(3.0)).failed());
/// ```
#[derive(Debug, Clone)]
pub struct Type {
    expected: ValueType,
}

impl Type {
    /// Creates a type check for the given tag.
    pub fn new(expected: ValueType) -> Self {
        Self { expected }
    }

    /// Returns the expected tag.
    pub fn expected(&self) -> ValueType {
        self.expected
    }
}

impl Conform for Type {
    fn name(&self) -> &str {
        self.expected.name()
    }

    fn conform(&self, value: &Value) -> ConformResult {
        if value.value_type() == self.expected {
            ConformResult::pass(value.clone())
        } else {
            ConformResult::fail(ConformError::new(
                "type_error",
                vec![self.expected.name().to_string(), value.type_name().to_string()],
            ))
        }
    }
}

/// A type check that coerces primitive mismatches.
///
/// Values already of the expected type pass untouched. Otherwise a
/// well-defined primitive conversion is attempted and the coerced value
/// is the output; inputs outside the conversion table fail with
/// `coercion_error`.
///
/// # Example
///
/// ```rust
/// use conformal::{Conform, Def, Value, ValueType};
///
/// let def = Def::coercible(ValueType::Float).unwrap();
/// let result = def.conform(&Value::from("1.5"));
/// assert_eq!(result.value(), &Value::Float(1.5));
///
/// // Non-primitive targets are rejected when the definition is built.
/// assert!(Def::coercible(ValueType::Seq).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CoercibleType {
    expected: ValueType,
}

impl CoercibleType {
    /// Creates a coercing type check for a primitive tag.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotCoercible`] for non-primitive tags.
    pub fn new(expected: ValueType) -> Result<Self, ConfigError> {
        if expected.is_primitive() {
            Ok(Self { expected })
        } else {
            Err(ConfigError::NotCoercible(expected))
        }
    }

    /// Returns the expected tag.
    pub fn expected(&self) -> ValueType {
        self.expected
    }

    fn coerce(&self, value: &Value) -> Option<Value> {
        match (self.expected, value) {
            (ValueType::Int, Value::Float(f)) => {
                let f = *f;
                if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                    Some(Value::Int(f.trunc() as i64))
                } else {
                    None
                }
            }
            (ValueType::Int, Value::Text(s)) => s.trim().parse::<i64>().ok().map(Value::Int),
            (ValueType::Float, Value::Int(i)) => Some(Value::Float(*i as f64)),
            (ValueType::Float, Value::Text(s)) => s.trim().parse::<f64>().ok().map(Value::Float),
            (ValueType::Text, Value::Int(i)) => Some(Value::Text(i.to_string())),
            (ValueType::Text, Value::Float(f)) => Some(Value::Text(f.to_string())),
            (ValueType::Text, Value::Bool(b)) => Some(Value::Text(b.to_string())),
            (ValueType::Bool, Value::Text(s)) => match s.as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Conform for CoercibleType {
    fn name(&self) -> &str {
        self.expected.name()
    }

    fn conform(&self, value: &Value) -> ConformResult {
        if value.value_type() == self.expected {
            return ConformResult::pass(value.clone());
        }
        match self.coerce(value) {
            Some(coerced) => ConformResult::pass(coerced),
            None => ConformResult::fail(ConformError::new(
                "coercion_error",
                vec![self.expected.name().to_string(), value.type_name().to_string()],
            )),
        }
    }
}
