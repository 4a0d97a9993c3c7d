//! User-supplied conform blocks.
//!
//! [`Lambda`] wraps an arbitrary block that inspects the input and
//! reports its outcome through a [`LambdaContext`] — a recorder the
//! block writes into, not exception-based control flow.

use std::sync::Arc;

use crate::error::ConformError;
use crate::result::ConformResult;
use crate::value::Value;

use super::Conform;

/// Type alias for the block stored in a [`Lambda`].
pub type LambdaBlock = Arc<dyn Fn(&Value, &mut LambdaContext) + Send + Sync>;

enum Outcome {
    Pass(Value),
    Fail(String, Vec<String>),
}

/// The continuation context handed to a lambda block.
///
/// The block registers its outcome by calling [`conform_with`] or
/// [`fail_with`] at most once. Registering twice is a programmer error
/// and panics; registering never makes the lambda fail with
/// `lambda_failed`.
///
/// [`conform_with`]: LambdaContext::conform_with
/// [`fail_with`]: LambdaContext::fail_with
#[derive(Default)]
pub struct LambdaContext {
    outcome: Option<Outcome>,
}

impl LambdaContext {
    /// Registers success with the given output value.
    ///
    /// # Panics
    ///
    /// Panics if an outcome was already registered.
    pub fn conform_with(&mut self, value: Value) {
        self.set(Outcome::Pass(value));
    }

    /// Registers failure with a custom message key and arguments.
    ///
    /// # Panics
    ///
    /// Panics if an outcome was already registered.
    pub fn fail_with(&mut self, key: impl Into<String>, args: Vec<String>) {
        self.set(Outcome::Fail(key.into(), args));
    }

    fn set(&mut self, outcome: Outcome) {
        assert!(
            self.outcome.is_none(),
            "lambda block registered more than one outcome"
        );
        self.outcome = Some(outcome);
    }
}

/// A definition delegating to a user-supplied block.
///
/// Panics raised inside the block propagate unchanged; there is no
/// implicit catch.
///
/// # Example
///
/// ```rust
/// use conformal::{Conform, Def, Value};
///
/// // Accept an integer millisecond count, emit seconds.
/// let def = Def::lambda("ms_to_secs", |v, ctx| {
///     if let Some(ms) = v.as_int() {
///         ctx.conform_with(Value::Int(ms / 1000));
///     }
/// });
///
/// assert_eq!(def.conform(&Value::Int(5000)).value(), &Value::Int(5));
///
/// // No registered outcome means failure.
/// let result = def.conform(&Value::from("x"));
/// assert_eq!(result.errors()[0].key, "lambda_failed");
/// ```
#[derive(Clone)]
pub struct Lambda {
    name: String,
    block: LambdaBlock,
}

impl Lambda {
    /// Creates a lambda definition from a name and a block.
    pub fn new<F>(name: impl Into<String>, block: F) -> Self
    where
        F: Fn(&Value, &mut LambdaContext) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            block: Arc::new(block),
        }
    }
}

impl Conform for Lambda {
    fn name(&self) -> &str {
        &self.name
    }

    fn conform(&self, value: &Value) -> ConformResult {
        let mut ctx = LambdaContext::default();
        (self.block)(value, &mut ctx);
        match ctx.outcome {
            Some(Outcome::Pass(out)) => ConformResult::pass(out),
            Some(Outcome::Fail(key, args)) => ConformResult::fail(ConformError::new(key, args)),
            None => ConformResult::fail(ConformError::new(
                "lambda_failed",
                vec![self.name.clone()],
            )),
        }
    }
}
