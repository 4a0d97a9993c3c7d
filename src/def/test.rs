//! Leaf predicate definitions.
//!
//! [`Test`] is the workhorse leaf: a named predicate over a value that
//! fails with a fixed message key when the predicate is false. All the
//! numeric, size and pattern leaves are instances of this pattern.

use std::sync::Arc;

use crate::error::ConformError;
use crate::result::ConformResult;
use crate::value::Value;

use super::Conform;

/// Type alias for the predicate stored in a [`Test`].
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A named predicate over a value.
///
/// `conform` passes the input through unchanged when the predicate holds
/// and otherwise fails with a single error carrying the configured
/// message key and arguments. By default the arguments are `[name]`;
/// leaves that report a bound instead (comparators, sizes) override them
/// with [`Test::with_args`].
///
/// # Example
///
/// ```rust
/// use conformal::{Conform, Def, Value};
///
/// let even = Def::test("even", "even_failed", |v: &Value| {
///     v.as_int().is_some_and(|i| i % 2 == 0)
/// });
///
/// assert!(even.conform(&Value::Int(4)).passed());
/// let result = even.conform(&Value::Int(3));
/// assert_eq!(result.errors()[0].key, "even_failed");
/// assert_eq!(result.errors()[0].args, vec!["even".to_string()]);
/// ```
#[derive(Clone)]
pub struct Test {
    name: String,
    key: String,
    args: Vec<String>,
    predicate: Predicate,
}

impl Test {
    /// Creates a test with the given name, message key and predicate.
    pub fn new<F>(name: impl Into<String>, key: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        Self {
            args: vec![name.clone()],
            name,
            key: key.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Replaces the error arguments reported on failure.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Returns the message key reported on failure.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Conform for Test {
    fn name(&self) -> &str {
        &self.name
    }

    fn conform(&self, value: &Value) -> ConformResult {
        if (self.predicate)(value) {
            ConformResult::pass(value.clone())
        } else {
            ConformResult::fail(ConformError::new(self.key.clone(), self.args.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_value_through_unchanged() {
        let t = Test::new("anything", "never", |_| true);
        let result = t.conform(&Value::from("hello"));
        assert!(result.passed());
        assert_eq!(result.value(), &Value::from("hello"));
    }

    #[test]
    fn test_fails_with_key_and_default_args() {
        let t = Test::new("positive", "gt_failed", |v: &Value| {
            v.as_number().is_some_and(|n| n > 0.0)
        });
        let result = t.conform(&Value::Int(-1));
        assert!(result.failed());
        let errors = result.errors();
        assert_eq!(errors[0].key, "gt_failed");
        assert_eq!(errors[0].args, vec!["positive".to_string()]);
        assert!(errors[0].path.is_root());
    }

    #[test]
    fn test_with_args_overrides_defaults() {
        let t = Test::new("bound", "gt_failed", |_| false).with_args(vec!["5".into()]);
        let result = t.conform(&Value::Int(1));
        assert_eq!(result.errors()[0].args, vec!["5".to_string()]);
    }
}
