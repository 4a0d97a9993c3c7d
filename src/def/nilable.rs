//! Null-tolerant delegation.

use crate::result::ConformResult;
use crate::value::Value;

use super::{Conform, DefRef};

/// A definition that lets the null sentinel through.
///
/// Null passes as null; anything else delegates to the inner definition,
/// whose errors surface unchanged.
///
/// # Example
///
/// ```rust
/// use conformal::{Conform, Def, Value, ValueType};
///
/// let def = Def::nilable(Def::value_type(ValueType::Text));
/// assert!(def.conform(&Value::Null).passed());
/// assert!(def.conform(&Value::from("hi")).passed());
/// assert!(def.conform(&Value::Int(1)).failed());
/// ```
#[derive(Clone)]
pub struct Nilable {
    inner: DefRef,
}

impl Nilable {
    /// Creates a null-tolerant wrapper around the inner definition.
    pub fn new(inner: DefRef) -> Self {
        Self { inner }
    }

    /// Returns the inner definition.
    pub fn inner(&self) -> &DefRef {
        &self.inner
    }
}

impl Conform for Nilable {
    fn name(&self) -> &str {
        "nilable"
    }

    fn conform(&self, value: &Value) -> ConformResult {
        if value.is_null() {
            ConformResult::pass(Value::Null)
        } else {
            self.inner.conform(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::{shared, Def};
    use crate::value::ValueType;

    #[test]
    fn test_null_passes_as_null() {
        let def = Nilable::new(shared(Def::value_type(ValueType::Int)));
        let result = def.conform(&Value::Null);
        assert_eq!(result.value(), &Value::Null);
    }

    #[test]
    fn test_inner_errors_surface_unchanged() {
        let def = Nilable::new(shared(Def::value_type(ValueType::Int)));
        let result = def.conform(&Value::from("x"));
        let errors = result.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].key, "type_error");
        assert!(errors[0].path.is_root());
    }
}
