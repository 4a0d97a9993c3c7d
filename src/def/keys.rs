//! Record validation with declared field specs.
//!
//! [`Keys`] validates keyed mappings against an ordered list of
//! [`KeySpec`]s: required and optional fields, literal defaults, an
//! extra-key policy, and build-time merging of other `Keys` definitions
//! via [`Keys::include`].

use indexmap::IndexMap;

use crate::error::ConformError;
use crate::pointer::{Pointer, PointerSegment};
use crate::result::ConformResult;
use crate::value::{Key, Value};

use super::{shared, Conform, ConfigError, DefRef};

/// A single declared field of a [`Keys`] definition.
///
/// Required specs never carry a default; the builder offers no way to
/// construct one.
#[derive(Clone)]
pub struct KeySpec {
    key: Key,
    def: DefRef,
    required: bool,
    default: Option<Value>,
}

impl KeySpec {
    /// Returns the declared key.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Returns the child definition.
    pub fn def(&self) -> &DefRef {
        &self.def
    }

    /// Returns true for required fields.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Returns the default emitted when an optional field is absent.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// The recognized options of a [`Keys`] definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeysOption {
    /// Silently drop extra input keys instead of reporting them.
    IgnoreExtraKeys,
}

/// A record validator over keyed mappings.
///
/// Field specs accumulate in declaration order through the builder
/// methods; duplicates are configuration errors. Symbolic and textual
/// keys are distinct: a spec keyed symbolically never matches a textual
/// input key, and the mismatched input key counts as extra.
///
/// Conforming produces a fresh mapping holding exactly the declared keys
/// that were present (transformed by their child definitions) plus
/// injected defaults, in declaration order. Inputs are never aliased.
///
/// # Example
///
/// ```rust
/// use conformal::{Conform, Def, Key, Value, ValueType};
///
/// let def = Def::keys()
///     .required(Key::sym("name"), Def::value_type(ValueType::Text))
///     .unwrap()
///     .optional_default(
///         Key::sym("role"),
///         Def::value_type(ValueType::Text),
///         Value::from("user"),
///     )
///     .unwrap();
///
/// let result = def.conform(&Value::map([(Key::sym("name"), Value::from("ada"))]));
/// assert!(result.passed());
/// let out = result.value().as_map().unwrap();
/// assert_eq!(out[&Key::sym("role")], Value::from("user"));
/// ```
#[derive(Clone, Default)]
pub struct Keys {
    specs: Vec<KeySpec>,
    ignore_extra_keys: bool,
}

impl Keys {
    /// Creates an empty record definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a required field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateKey`] if the key is already declared.
    pub fn required(
        self,
        key: Key,
        def: impl Conform + 'static,
    ) -> Result<Self, ConfigError> {
        self.insert_spec(KeySpec {
            key,
            def: shared(def),
            required: true,
            default: None,
        })
    }

    /// Declares an optional field without a default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateKey`] if the key is already declared.
    pub fn optional(
        self,
        key: Key,
        def: impl Conform + 'static,
    ) -> Result<Self, ConfigError> {
        self.insert_spec(KeySpec {
            key,
            def: shared(def),
            required: false,
            default: None,
        })
    }

    /// Declares an optional field with a default.
    ///
    /// The default is emitted verbatim when the field is absent; it is
    /// never re-validated against the child definition.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateKey`] if the key is already declared.
    pub fn optional_default(
        self,
        key: Key,
        def: impl Conform + 'static,
        default: Value,
    ) -> Result<Self, ConfigError> {
        self.insert_spec(KeySpec {
            key,
            def: shared(def),
            required: false,
            default: Some(default),
        })
    }

    /// Enables a recognized option.
    pub fn option(mut self, option: KeysOption) -> Self {
        match option {
            KeysOption::IgnoreExtraKeys => self.ignore_extra_keys = true,
        }
        self
    }

    /// Merges another record definition's field specs into this one.
    ///
    /// Resolution happens now, at build time; conforming behaves exactly
    /// as if the merged specs had been declared inline.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IncludeCollision`] if any merged key is
    /// already declared here.
    pub fn include(mut self, other: &Keys) -> Result<Self, ConfigError> {
        for spec in &other.specs {
            if self.has_key(&spec.key) {
                return Err(ConfigError::IncludeCollision(spec.key.clone()));
            }
            self.specs.push(spec.clone());
        }
        Ok(self)
    }

    /// Returns the declared keys in declaration order.
    ///
    /// Value-object wrappers use this to synthesize per-key accessors.
    pub fn keys(&self) -> Vec<Key> {
        self.specs.iter().map(|s| s.key.clone()).collect()
    }

    /// Returns the declared field specs in declaration order.
    pub fn specs(&self) -> &[KeySpec] {
        &self.specs
    }

    fn has_key(&self, key: &Key) -> bool {
        self.specs.iter().any(|s| &s.key == key)
    }

    fn insert_spec(mut self, spec: KeySpec) -> Result<Self, ConfigError> {
        if self.has_key(&spec.key) {
            return Err(ConfigError::DuplicateKey(spec.key));
        }
        self.specs.push(spec);
        Ok(self)
    }
}

impl Conform for Keys {
    fn name(&self) -> &str {
        "keys"
    }

    fn conform(&self, value: &Value) -> ConformResult {
        let input = match value.as_map() {
            Some(entries) => entries,
            None => {
                return ConformResult::fail(ConformError::new(
                    "not_a_mapping",
                    vec![value.type_name().to_string()],
                ));
            }
        };

        let mut errors = Vec::new();

        if !self.ignore_extra_keys {
            for key in input.keys() {
                if !self.has_key(key) {
                    errors.push(
                        ConformError::new("unexpected_key", vec![key.name().to_string()])
                            .with_path(Pointer::from_token(key.name())),
                    );
                }
            }
        }

        let mut output: IndexMap<Key, Value> = IndexMap::new();
        for spec in &self.specs {
            match input.get(&spec.key) {
                Some(field_value) => match spec.def.conform(field_value) {
                    ConformResult::Passed(out) => {
                        output.insert(spec.key.clone(), out);
                    }
                    ConformResult::Failed(child_errors) => {
                        let segment = PointerSegment::token(spec.key.name());
                        let nested: Vec<ConformError> = child_errors
                            .into_vec()
                            .into_iter()
                            .map(|e| e.rebase(segment.clone()))
                            .collect();
                        errors.push(
                            ConformError::new("key_failed", vec![spec.key.name().to_string()])
                                .with_path(Pointer::from_token(spec.key.name()))
                                .with_nested(nested),
                        );
                    }
                },
                None if spec.required => {
                    errors.push(
                        ConformError::new("missing_key", vec![spec.key.name().to_string()])
                            .with_path(Pointer::from_token(spec.key.name())),
                    );
                }
                None => {
                    if let Some(default) = &spec.default {
                        output.insert(spec.key.clone(), default.clone());
                    }
                }
            }
        }

        if errors.is_empty() {
            ConformResult::pass(Value::Map(output))
        } else {
            ConformResult::fail_all(errors)
        }
    }
}
