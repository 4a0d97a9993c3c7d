//! # Conformal
//!
//! A composable validation and coercion engine. The expected shape of a
//! value — scalar type, numeric bound, string pattern, keyed record,
//! homogeneous sequence, disjunction, conjunction, custom predicate — is
//! described as a tree of immutable definitions; conforming an input
//! against the tree yields either a transformed output value or a
//! structured, path-addressable error report.
//!
//! ## Overview
//!
//! Validation and coercion are one operation: rules like "string →
//! number" or "milliseconds → timestamp" simultaneously check and
//! transform, and [`And`] threads each child's output into the next
//! child's input so coercions compose with later checks.
//!
//! ## Core Types
//!
//! - [`Value`]: the dynamically-shaped datum being conformed
//! - [`Def`]: factory for every definition node
//! - [`ConformResult`]: output value or a non-empty error list
//! - [`ConformError`]: message key + arguments + JSON-Pointer path +
//!   nested causes
//!
//! ## Example
//!
//! ```rust
//! use conformal::{Conform, Def, Key, Value, ValueType};
//!
//! let user = Def::keys()
//!     .required(Key::sym("name"), Def::non_empty_string())
//!     .unwrap()
//!     .required(Key::sym("age"), Def::value_type(ValueType::Int))
//!     .unwrap();
//!
//! let result = user.conform(&Value::map([
//!     (Key::sym("name"), Value::from("Ada")),
//!     (Key::sym("age"), Value::from("36")),
//! ]));
//!
//! assert!(result.failed());
//! let errors = result.errors();
//! assert_eq!(errors[0].path.to_string(), "/age");
//! assert_eq!(result.error_hash()["age"].len(), 2);
//! ```

pub mod batch;
pub mod def;
pub mod error;
pub mod i18n;
pub mod interop;
pub mod pointer;
pub mod result;
pub mod value;

pub use def::{
    shared, And, CoercibleType, Conform, ConfigError, Def, DefRef, Each, KeySpec, Keys,
    KeysOption, Lambda, LambdaContext, Nilable, Or, Test, Type,
};
pub use error::{ConformError, ConformErrors};
pub use pointer::{Pointer, PointerSegment};
pub use result::ConformResult;
pub use value::{CustomValue, Key, Value, ValueType};

/// Type alias for fallible definition construction.
pub type BuildResult<T> = Result<T, ConfigError>;
