//! Homogeneous sequence validation.

use crate::error::ConformError;
use crate::pointer::PointerSegment;
use crate::result::ConformResult;
use crate::value::Value;

use super::{Conform, DefRef};

/// A definition that conforms every element of a sequence.
///
/// Every element is visited — `Each` never short-circuits, so a sequence
/// failing at indices 2 and 5 reports both. Errors from failing elements
/// are re-based under `/<index>` and nested beneath a single
/// `each_failed` summary. On success the output is a fresh sequence of
/// the transformed elements in original order.
///
/// # Example
///
/// ```rust
/// use conformal::{Conform, Def, Value, ValueType};
///
/// let def = Def::each(Def::value_type(ValueType::Int));
///
/// let ok = def.conform(&Value::seq([Value::Int(1), Value::Int(2)]));
/// assert!(ok.passed());
///
/// let bad = def.conform(&Value::seq([Value::Int(1), Value::from("2")]));
/// let errors = bad.errors();
/// assert_eq!(errors[0].key, "each_failed");
/// assert_eq!(errors[1].path.to_string(), "/1");
/// ```
#[derive(Clone)]
pub struct Each {
    item: DefRef,
}

impl Each {
    /// Creates a sequence definition with the given item definition.
    pub fn new(item: DefRef) -> Self {
        Self { item }
    }

    /// Returns the item definition.
    pub fn item(&self) -> &DefRef {
        &self.item
    }
}

impl Conform for Each {
    fn name(&self) -> &str {
        "each"
    }

    fn conform(&self, value: &Value) -> ConformResult {
        let items = match value.as_seq() {
            Some(items) => items,
            None => {
                return ConformResult::fail(ConformError::new(
                    "not_a_sequence",
                    vec![value.type_name().to_string()],
                ));
            }
        };

        let mut outputs = Vec::with_capacity(items.len());
        let mut nested = Vec::new();
        let mut failing = 0usize;

        for (index, item) in items.iter().enumerate() {
            match self.item.conform(item) {
                ConformResult::Passed(out) => outputs.push(out),
                ConformResult::Failed(errors) => {
                    failing += 1;
                    nested.extend(
                        errors
                            .into_vec()
                            .into_iter()
                            .map(|e| e.rebase(PointerSegment::index(index))),
                    );
                }
            }
        }

        if nested.is_empty() {
            ConformResult::pass(Value::Seq(outputs))
        } else {
            ConformResult::fail(
                ConformError::new("each_failed", vec![failing.to_string()]).with_nested(nested),
            )
        }
    }
}
