//! Definition nodes and their uniform conform contract.
//!
//! Every validator is a [`Conform`] implementation: an immutable node
//! that takes a value and returns a [`ConformResult`]. Composites hold
//! their children as shared [`DefRef`]s, so a definition tree built once
//! can be conformed concurrently from any number of threads.
//!
//! The [`Def`] factory is the construction surface for the whole
//! algebra.

mod and_or;
mod each;
mod keys;
mod lambda;
mod nilable;
mod test;
mod types;

use std::sync::Arc;

use regex::Regex;

use crate::result::ConformResult;
use crate::value::{Key, Value, ValueType};

pub use and_or::{And, Or};
pub use each::Each;
pub use keys::{KeySpec, Keys, KeysOption};
pub use lambda::{Lambda, LambdaContext};
pub use nilable::Nilable;
pub use test::Test;
pub use types::{CoercibleType, Type};

/// The uniform contract every definition implements.
///
/// Definitions are immutable after construction and never mutated by
/// `conform`, which is why the trait requires `Send + Sync`: one tree
/// serves arbitrarily many concurrent conforms without coordination.
pub trait Conform: Send + Sync {
    /// Returns the definition name used in error templates.
    fn name(&self) -> &str;

    /// Conforms a value, producing either the (possibly transformed)
    /// output or the errors explaining the failure.
    fn conform(&self, value: &Value) -> ConformResult;
}

/// A shared, type-erased definition.
pub type DefRef = Arc<dyn Conform>;

impl<D: Conform + ?Sized> Conform for Arc<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn conform(&self, value: &Value) -> ConformResult {
        (**self).conform(value)
    }
}

/// Type-erases a definition into a shared [`DefRef`].
pub fn shared<D: Conform + 'static>(def: D) -> DefRef {
    Arc::new(def)
}

/// Errors detected while building definitions.
///
/// These mark programmer mistakes, not bad input data, and are kept
/// strictly apart from conform failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A key was declared twice within one record definition.
    #[error("duplicate key '{0}' in keys definition")]
    DuplicateKey(Key),

    /// An include would redefine an already-declared key.
    #[error("include would redefine key '{0}'")]
    IncludeCollision(Key),

    /// Coercion was requested for a non-primitive type.
    #[error("type '{0}' does not support coercion")]
    NotCoercible(ValueType),

    /// A combinator was built without children.
    #[error("'{0}' requires at least one child definition")]
    EmptyCombinator(String),

    /// An enum was built without members.
    #[error("enum requires at least one member")]
    EmptyEnum,
}

/// Entry point for building definitions.
///
/// `Def` provides factory methods for every node of the algebra: type
/// checks, coercions, combinators, the record validator, user lambdas,
/// and the predefined predicate leaves.
///
/// # Example
///
/// ```rust
/// use conformal::{Conform, Def, Key, Value};
///
/// let event = Def::keys()
///     .required(Key::sym("title"), Def::non_empty_string())
///     .unwrap()
///     .optional(Key::sym("tags"), Def::each(Def::string()))
///     .unwrap();
///
/// let input = Value::map([(Key::sym("title"), Value::from("launch"))]);
/// assert!(event.conform(&input).passed());
/// ```
pub struct Def;

impl Def {
    /// Builds an exact type check.
    pub fn value_type(expected: ValueType) -> Type {
        Type::new(expected)
    }

    /// Shorthand for `value_type(ValueType::Text)`.
    pub fn string() -> Type {
        Type::new(ValueType::Text)
    }

    /// Shorthand for `value_type(ValueType::Int)`.
    pub fn integer() -> Type {
        Type::new(ValueType::Int)
    }

    /// Shorthand for `value_type(ValueType::Float)`.
    pub fn float() -> Type {
        Type::new(ValueType::Float)
    }

    /// Shorthand for `value_type(ValueType::Time)`.
    pub fn time() -> Type {
        Type::new(ValueType::Time)
    }

    /// Builds a coercing type check for a primitive type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotCoercible`] for non-primitive types.
    pub fn coercible(expected: ValueType) -> Result<CoercibleType, ConfigError> {
        CoercibleType::new(expected)
    }

    /// Builds a leaf predicate.
    pub fn test<F>(name: impl Into<String>, key: impl Into<String>, predicate: F) -> Test
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Test::new(name, key, predicate)
    }

    /// Builds a threading conjunction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCombinator`] when `children` is empty.
    pub fn and(name: impl Into<String>, children: Vec<DefRef>) -> Result<And, ConfigError> {
        And::new(name, children)
    }

    /// Builds a first-match disjunction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCombinator`] when `children` is empty.
    pub fn or(name: impl Into<String>, children: Vec<DefRef>) -> Result<Or, ConfigError> {
        Or::new(name, children)
    }

    /// Builds a homogeneous sequence definition.
    pub fn each(item: impl Conform + 'static) -> Each {
        Each::new(shared(item))
    }

    /// Builds an empty record definition.
    pub fn keys() -> Keys {
        Keys::new()
    }

    /// Builds a user-supplied conform block.
    pub fn lambda<F>(name: impl Into<String>, block: F) -> Lambda
    where
        F: Fn(&Value, &mut LambdaContext) + Send + Sync + 'static,
    {
        Lambda::new(name, block)
    }

    /// Builds a null-tolerant wrapper.
    pub fn nilable(inner: impl Conform + 'static) -> Nilable {
        Nilable::new(shared(inner))
    }

    /// Passes only the null sentinel.
    pub fn nil() -> Test {
        Test::new("nil", "nil_failed", |v: &Value| v.is_null())
    }

    /// Passes only boolean values.
    pub fn boolean() -> Test {
        Test::new("boolean", "boolean_failed", |v: &Value| {
            matches!(v, Value::Bool(_))
        })
    }

    /// Passes values equal to the expected value.
    pub fn equal(expected: impl Into<Value>) -> Test {
        let expected = expected.into();
        let display = expected.to_string();
        Test::new("equal", "equal_failed", move |v: &Value| v == &expected)
            .with_args(vec![display])
    }

    /// Passes values equal to one of the members.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyEnum`] when `members` is empty.
    pub fn enum_of(members: Vec<Value>) -> Result<Test, ConfigError> {
        if members.is_empty() {
            return Err(ConfigError::EmptyEnum);
        }
        let listed = members
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let test = Test::new("enum", "enum_failed", move |v: &Value| {
            members.iter().any(|m| m == v)
        })
        .with_args(vec![listed]);
        Ok(test)
    }

    /// Passes sized values with no contents.
    pub fn empty() -> Test {
        Test::new("empty", "empty_failed", |v: &Value| v.size() == Some(0))
    }

    /// Passes sized values with at least one element.
    pub fn non_empty() -> Test {
        Test::new("non_empty", "non_empty_failed", |v: &Value| {
            v.size().is_some_and(|s| s > 0)
        })
    }

    /// Passes sized values with at least `min` elements.
    pub fn min_size(min: usize) -> Test {
        Test::new("min_size", "size_min", move |v: &Value| {
            v.size().is_some_and(|s| s >= min)
        })
        .with_args(vec![min.to_string()])
    }

    /// Passes sized values with at most `max` elements.
    pub fn max_size(max: usize) -> Test {
        Test::new("max_size", "size_max", move |v: &Value| {
            v.size().is_some_and(|s| s <= max)
        })
        .with_args(vec![max.to_string()])
    }

    /// Passes numbers strictly greater than the bound.
    pub fn greater_than(bound: f64) -> Test {
        Test::new("greater_than", "gt_failed", move |v: &Value| {
            v.as_number().is_some_and(|n| n > bound)
        })
        .with_args(vec![fmt_bound(bound)])
    }

    /// Passes numbers strictly less than the bound.
    pub fn less_than(bound: f64) -> Test {
        Test::new("less_than", "lt_failed", move |v: &Value| {
            v.as_number().is_some_and(|n| n < bound)
        })
        .with_args(vec![fmt_bound(bound)])
    }

    /// Passes numbers greater than or equal to the bound.
    pub fn greater_than_equal(bound: f64) -> Test {
        Test::new("greater_than_equal", "gte_failed", move |v: &Value| {
            v.as_number().is_some_and(|n| n >= bound)
        })
        .with_args(vec![fmt_bound(bound)])
    }

    /// Passes numbers less than or equal to the bound.
    pub fn less_than_equal(bound: f64) -> Test {
        Test::new("less_than_equal", "lte_failed", move |v: &Value| {
            v.as_number().is_some_and(|n| n <= bound)
        })
        .with_args(vec![fmt_bound(bound)])
    }

    /// Passes strings matching the pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the regex pattern is invalid.
    pub fn regex(pattern: &str) -> Result<Test, regex::Error> {
        let re = Regex::new(pattern)?;
        let test = Test::new("regex", "regex_failed", move |v: &Value| {
            v.as_text().is_some_and(|s| re.is_match(s))
        })
        .with_args(vec![pattern.to_string()]);
        Ok(test)
    }

    /// Passes non-empty strings; the common record-field building block.
    pub fn non_empty_string() -> And {
        And::new(
            "non_empty_string",
            vec![shared(Def::string()), shared(Def::min_size(1))],
        )
        .expect("two children")
    }
}

/// Renders a numeric bound without a trailing `.0` for whole numbers.
fn fmt_bound(bound: f64) -> String {
    if bound.fract() == 0.0 && bound.abs() < 1e15 {
        format!("{}", bound as i64)
    } else {
        bound.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nil_and_boolean_leaves() {
        assert!(Def::nil().conform(&Value::Null).passed());
        assert!(Def::nil().conform(&Value::Int(0)).failed());
        assert!(Def::boolean().conform(&Value::Bool(false)).passed());
        assert!(Def::boolean().conform(&Value::Int(0)).failed());
    }

    #[test]
    fn test_equal_leaf() {
        let def = Def::equal(Value::Int(42));
        assert!(def.conform(&Value::Int(42)).passed());
        let result = def.conform(&Value::Int(41));
        assert_eq!(result.errors()[0].key, "equal_failed");
        assert_eq!(result.errors()[0].args, vec!["42".to_string()]);
    }

    #[test]
    fn test_enum_leaf() {
        let def = Def::enum_of(vec![Value::from("a"), Value::from("b")]).unwrap();
        assert!(def.conform(&Value::from("a")).passed());
        let result = def.conform(&Value::from("c"));
        assert_eq!(result.errors()[0].key, "enum_failed");
        assert_eq!(result.errors()[0].args, vec!["\"a\", \"b\"".to_string()]);
    }

    #[test]
    fn test_enum_requires_members() {
        assert!(matches!(Def::enum_of(Vec::new()), Err(ConfigError::EmptyEnum)));
    }

    #[test]
    fn test_enum_uses_value_equality_across_variants() {
        let def = Def::enum_of(vec![Value::Int(1)]).unwrap();
        // Floats are never equal to integers under tagged equality.
        assert!(def.conform(&Value::Float(1.0)).failed());
    }

    #[test]
    fn test_size_leaves() {
        assert!(Def::min_size(2).conform(&Value::from("ab")).passed());
        assert!(Def::min_size(2).conform(&Value::from("a")).failed());
        assert!(Def::max_size(2).conform(&Value::seq([Value::Int(1)])).passed());
        assert!(Def::max_size(0).conform(&Value::from("a")).failed());
        // Unsized values never satisfy size checks.
        assert!(Def::min_size(0).conform(&Value::Int(1)).failed());
    }

    #[test]
    fn test_empty_and_non_empty() {
        assert!(Def::empty().conform(&Value::from("")).passed());
        assert!(Def::empty().conform(&Value::from("x")).failed());
        assert!(Def::non_empty().conform(&Value::seq([Value::Null])).passed());
        assert!(Def::non_empty().conform(&Value::seq([])).failed());
    }

    #[test]
    fn test_comparators_cover_both_numeric_tags() {
        assert!(Def::greater_than(5.0).conform(&Value::Int(7)).passed());
        assert!(Def::greater_than(5.0).conform(&Value::Float(5.5)).passed());
        assert!(Def::greater_than(5.0).conform(&Value::Int(5)).failed());
        assert!(Def::less_than_equal(5.0).conform(&Value::Int(5)).passed());
        assert!(Def::greater_than_equal(5.0).conform(&Value::Int(4)).failed());
        assert!(Def::less_than(5.0).conform(&Value::from("4")).failed());
    }

    #[test]
    fn test_comparator_args_show_the_bound() {
        let result = Def::greater_than(5.0).conform(&Value::Int(4));
        assert_eq!(result.errors()[0].args, vec!["5".to_string()]);

        let result = Def::less_than(2.5).conform(&Value::Int(4));
        assert_eq!(result.errors()[0].args, vec!["2.5".to_string()]);
    }

    #[test]
    fn test_regex_leaf() {
        let def = Def::regex(r"^\d+$").unwrap();
        assert!(def.conform(&Value::from("123")).passed());
        assert!(def.conform(&Value::from("abc")).failed());
        assert!(def.conform(&Value::Int(123)).failed());

        assert!(Def::regex(r"[invalid").is_err());
    }

    #[test]
    fn test_non_empty_string() {
        let def = Def::non_empty_string();
        assert!(def.conform(&Value::from("x")).passed());

        let result = def.conform(&Value::from(""));
        let errors = result.errors();
        assert_eq!(errors[0].key, "and_failed");
        assert_eq!(errors[1].key, "size_min");
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::DuplicateKey(Key::sym("name"));
        assert_eq!(err.to_string(), "duplicate key ':name' in keys definition");

        let err = ConfigError::NotCoercible(ValueType::Seq);
        assert_eq!(err.to_string(), "type 'sequence' does not support coercion");
    }
}
