//! The outcome of conforming a value against a definition.
//!
//! [`ConformResult`] is the sum every definition returns: either the
//! (possibly transformed) output value, or a non-empty list of
//! path-tagged errors.

use indexmap::IndexMap;

use crate::error::{ConformError, ConformErrors};
use crate::i18n;
use crate::pointer::PointerSegment;
use crate::value::Value;

/// Either a conformed output value or the errors explaining why not.
///
/// Invariants: `Passed` never carries errors and `Failed` never carries
/// a value — asking a failed result for its value is a programmer error
/// and panics deterministically.
///
/// # Example
///
/// ```rust
/// use conformal::{Conform, Def, Value, ValueType};
///
/// let def = Def::value_type(ValueType::Text);
///
/// let ok = def.conform(&Value::from("hi"));
/// assert!(ok.passed());
/// assert_eq!(ok.value(), &Value::from("hi"));
///
/// let bad = def.conform(&Value::Int(3));
/// assert!(bad.failed());
/// assert_eq!(bad.errors()[0].key, "type_error");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ConformResult {
    /// The input conformed; carries the output value.
    Passed(Value),
    /// The input did not conform; carries at least one error.
    Failed(ConformErrors),
}

impl ConformResult {
    /// Creates a passed result.
    pub fn pass(value: Value) -> Self {
        ConformResult::Passed(value)
    }

    /// Creates a failed result from a single error.
    pub fn fail(error: ConformError) -> Self {
        ConformResult::Failed(ConformErrors::single(error))
    }

    /// Creates a failed result from a vec of errors.
    ///
    /// # Panics
    ///
    /// Panics if the vec is empty.
    pub fn fail_all(errors: Vec<ConformError>) -> Self {
        ConformResult::Failed(ConformErrors::from_vec(errors))
    }

    /// Returns true if the input conformed.
    pub fn passed(&self) -> bool {
        matches!(self, ConformResult::Passed(_))
    }

    /// Returns true if the input did not conform.
    pub fn failed(&self) -> bool {
        matches!(self, ConformResult::Failed(_))
    }

    /// Returns the output value.
    ///
    /// # Panics
    ///
    /// Panics if the result is `Failed`; a failed result never carries a
    /// value.
    pub fn value(&self) -> &Value {
        match self {
            ConformResult::Passed(value) => value,
            ConformResult::Failed(_) => panic!("value() called on a failed ConformResult"),
        }
    }

    /// Consumes the result and returns the output value.
    ///
    /// # Panics
    ///
    /// Panics if the result is `Failed`.
    pub fn into_value(self) -> Value {
        match self {
            ConformResult::Passed(value) => value,
            ConformResult::Failed(_) => panic!("into_value() called on a failed ConformResult"),
        }
    }

    /// Returns the flat preorder traversal of all errors, paths fully
    /// qualified. Empty for passed results.
    pub fn errors(&self) -> Vec<&ConformError> {
        match self {
            ConformResult::Passed(_) => Vec::new(),
            ConformResult::Failed(errors) => errors.flatten(),
        }
    }

    /// Returns the top-level errors of a failed result.
    pub fn top_errors(&self) -> Option<&ConformErrors> {
        match self {
            ConformResult::Passed(_) => None,
            ConformResult::Failed(errors) => Some(errors),
        }
    }

    /// Returns a hierarchical view of the errors, keyed by the first
    /// path fragment.
    ///
    /// Each entry lists the errors attached at or below that fragment,
    /// in first-seen order; root-level errors group under `""`. Used for
    /// rendering per-field validation summaries.
    pub fn error_hash(&self) -> IndexMap<String, Vec<ConformError>> {
        let mut hash: IndexMap<String, Vec<ConformError>> = IndexMap::new();
        for error in self.errors() {
            let fragment = match error.path.first() {
                None => String::new(),
                Some(PointerSegment::Token(token)) => token.clone(),
                Some(PointerSegment::Index(idx)) => idx.to_string(),
            };
            hash.entry(fragment).or_default().push(error.clone());
        }
        hash
    }

    /// Renders a human-readable message in the default locale.
    ///
    /// Nested causes are delimited with `{ … }`; sibling messages join
    /// with `", "`. Empty for passed results.
    pub fn error_message(&self) -> String {
        self.error_message_for(i18n::DEFAULT_LOCALE)
    }

    /// Renders a human-readable message in the given locale.
    pub fn error_message_for(&self, locale: &str) -> String {
        match self {
            ConformResult::Passed(_) => String::new(),
            ConformResult::Failed(errors) => {
                let parts: Vec<String> =
                    errors.iter().map(|e| e.message_tree(locale)).collect();
                parts.join(", ")
            }
        }
    }

    /// Adapts the result into a `Result` for `?`-style use.
    pub fn ok(self) -> Result<Value, ConformErrors> {
        match self {
            ConformResult::Passed(value) => Ok(value),
            ConformResult::Failed(errors) => Err(errors),
        }
    }
}
