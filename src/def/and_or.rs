//! Conjunction and disjunction combinators.
//!
//! [`And`] threads the value through its children left to right, so a
//! coercing child hands its output to the next check. [`Or`] tries each
//! child against the original input and takes the first success.

use crate::error::ConformError;
use crate::result::ConformResult;
use crate::value::Value;

use super::{Conform, ConfigError, DefRef};

/// A conjunction that threads the value through its children.
///
/// Children run left to right; each receives the previous child's
/// output, which is how coercion composes with later checks. The first
/// failing child stops evaluation and its errors become the nested
/// causes of a single `and_failed` error.
///
/// # Example
///
/// ```rust
/// use conformal::{shared, Conform, Def, Value};
///
/// let range = Def::and(
///     "range",
///     vec![shared(Def::greater_than(5.0)), shared(Def::less_than(10.0))],
/// )
/// .unwrap();
///
/// assert!(range.conform(&Value::Int(7)).passed());
/// assert!(range.conform(&Value::Int(4)).failed());
/// ```
#[derive(Clone)]
pub struct And {
    name: String,
    children: Vec<DefRef>,
}

impl And {
    /// Creates a conjunction over the given children.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCombinator`] when no children are given.
    pub fn new(name: impl Into<String>, children: Vec<DefRef>) -> Result<Self, ConfigError> {
        let name = name.into();
        if children.is_empty() {
            return Err(ConfigError::EmptyCombinator(name));
        }
        Ok(Self { name, children })
    }

    /// Returns the child definitions.
    pub fn children(&self) -> &[DefRef] {
        &self.children
    }
}

impl Conform for And {
    fn name(&self) -> &str {
        &self.name
    }

    fn conform(&self, value: &Value) -> ConformResult {
        let mut current = value.clone();
        for child in &self.children {
            match child.conform(&current) {
                ConformResult::Passed(next) => current = next,
                ConformResult::Failed(errors) => {
                    return ConformResult::fail(
                        ConformError::new("and_failed", vec![self.name.clone()])
                            .with_nested(errors.into_vec()),
                    );
                }
            }
        }
        ConformResult::pass(current)
    }
}

/// A disjunction that takes the first matching child.
///
/// Every child sees the original input; the value is not threaded
/// between alternatives. When all children fail, the result is a single
/// `or_failed` error whose nested causes concatenate every child's
/// errors in order.
///
/// # Example
///
/// ```rust
/// use conformal::{shared, Conform, Def, Value, ValueType};
///
/// let id = Def::or(
///     "id",
///     vec![
///         shared(Def::value_type(ValueType::Int)),
///         shared(Def::value_type(ValueType::Text)),
///     ],
/// )
/// .unwrap();
///
/// assert!(id.conform(&Value::Int(1)).passed());
/// assert!(id.conform(&Value::from("abc")).passed());
/// assert!(id.conform(&Value::Null).failed());
/// ```
#[derive(Clone)]
pub struct Or {
    name: String,
    children: Vec<DefRef>,
}

impl Or {
    /// Creates a disjunction over the given children.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCombinator`] when no children are given.
    pub fn new(name: impl Into<String>, children: Vec<DefRef>) -> Result<Self, ConfigError> {
        let name = name.into();
        if children.is_empty() {
            return Err(ConfigError::EmptyCombinator(name));
        }
        Ok(Self { name, children })
    }

    /// Returns the child definitions.
    pub fn children(&self) -> &[DefRef] {
        &self.children
    }
}

impl Conform for Or {
    fn name(&self) -> &str {
        &self.name
    }

    fn conform(&self, value: &Value) -> ConformResult {
        let mut collected = Vec::new();
        for child in &self.children {
            match child.conform(value) {
                passed @ ConformResult::Passed(_) => return passed,
                ConformResult::Failed(errors) => collected.extend(errors.into_vec()),
            }
        }
        ConformResult::fail(
            ConformError::new("or_failed", vec![self.name.clone()]).with_nested(collected),
        )
    }
}
