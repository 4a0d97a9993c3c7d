//! Conform error types.
//!
//! This module provides [`ConformError`] for single conform failures and
//! [`ConformErrors`] for the non-empty ordered collections carried by
//! failed results.

use std::fmt::{self, Display};

use crate::i18n;
use crate::pointer::{Pointer, PointerSegment};

/// A single conform error with full context.
///
/// `ConformError` captures everything needed to report a failure:
/// - **key**: stable, symbolic message key for i18n lookup (e.g. `type_error`)
/// - **args**: positional template arguments
/// - **path**: JSON-Pointer to the offending value, relative to the root
///   being conformed (`""` denotes the root)
/// - **nested**: causes contributed by child definitions, used by
///   composites to express "this failed because of these leaf failures"
///
/// Rendering is lazy: only `(key, args)` is stored and templates are
/// applied when a message is requested.
///
/// # Example
///
/// ```rust
/// use conformal::{ConformError, Pointer};
///
/// let error = ConformError::new("type_error", vec!["string".into(), "integer".into()])
///     .with_path(Pointer::from_token("name"));
///
/// assert_eq!(error.path.to_string(), "/name");
/// assert_eq!(error.message(), "expected string, got integer");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConformError {
    /// Symbolic message key.
    pub key: String,
    /// Positional template arguments, already rendered to text.
    pub args: Vec<String>,
    /// Pointer to the value that failed, relative to the conform root.
    pub path: Pointer,
    /// Causes from child definitions, in evaluation order.
    pub nested: Vec<ConformError>,
}

impl ConformError {
    /// Creates a new error at the root path with no nested causes.
    pub fn new(key: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            key: key.into(),
            args,
            path: Pointer::root(),
            nested: Vec::new(),
        }
    }

    /// Sets the path and returns self for chaining.
    pub fn with_path(mut self, path: Pointer) -> Self {
        self.path = path;
        self
    }

    /// Sets the nested causes and returns self for chaining.
    pub fn with_nested(mut self, nested: Vec<ConformError>) -> Self {
        self.nested = nested;
        self
    }

    /// Re-bases this error and every descendant under the given segment.
    ///
    /// Container definitions call this when surfacing child errors so
    /// that stored paths are always fully qualified relative to the
    /// node that produced the result.
    pub fn rebase(mut self, segment: PointerSegment) -> Self {
        self.path = self.path.prepend(segment.clone());
        self.nested = self
            .nested
            .into_iter()
            .map(|e| e.rebase(segment.clone()))
            .collect();
        self
    }

    /// Renders the message in the default locale.
    pub fn message(&self) -> String {
        self.translated_error(i18n::DEFAULT_LOCALE)
    }

    /// Renders the message in the given locale.
    ///
    /// Falls back to the key name and argument list when no template is
    /// registered for the locale.
    pub fn translated_error(&self, locale: &str) -> String {
        i18n::render(locale, &self.key, &self.args)
    }

    /// Renders this error and its nested causes as one line, with causes
    /// wrapped in `{ … }`.
    pub(crate) fn message_tree(&self, locale: &str) -> String {
        let own = self.translated_error(locale);
        if self.nested.is_empty() {
            own
        } else {
            let causes: Vec<String> = self.nested.iter().map(|e| e.message_tree(locale)).collect();
            format!("{} {{ {} }}", own, causes.join(", "))
        }
    }

    /// Returns the preorder traversal of this error tree, self first.
    pub fn flatten(&self) -> Vec<&ConformError> {
        let mut out = vec![self];
        for child in &self.nested {
            out.extend(child.flatten());
        }
        out
    }
}

impl Display for ConformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };
        write!(f, "{}: {}", path_str, self.message())
    }
}

impl std::error::Error for ConformError {}

// ConformError is Send + Sync since all fields are owned types. These
// assertions keep that true if the types change.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ConformError>();
    assert_sync::<ConformError>();
};

/// A non-empty ordered collection of conform errors.
///
/// Failed results always carry at least one error; `from_vec` enforces
/// the invariant by panicking on empty input, which marks a programmer
/// error in the calling definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ConformErrors(Vec<ConformError>);

impl ConformErrors {
    /// Creates a collection containing a single error.
    pub fn single(error: ConformError) -> Self {
        Self(vec![error])
    }

    /// Creates a collection from a vec of errors.
    ///
    /// # Panics
    ///
    /// Panics if the provided vec is empty.
    pub fn from_vec(errors: Vec<ConformError>) -> Self {
        assert!(
            !errors.is_empty(),
            "ConformErrors requires at least one error"
        );
        Self(errors)
    }

    /// Returns the number of top-level errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns false; this collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the top-level errors.
    pub fn iter(&self) -> impl Iterator<Item = &ConformError> {
        self.0.iter()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &ConformError {
        &self.0[0]
    }

    /// Appends another collection, preserving order.
    pub fn combine(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Converts this collection into a `Vec<ConformError>`.
    pub fn into_vec(self) -> Vec<ConformError> {
        self.0
    }

    /// Returns the preorder traversal of every error tree, in order.
    pub fn flatten(&self) -> Vec<&ConformError> {
        self.0.iter().flat_map(|e| e.flatten()).collect()
    }
}

impl Display for ConformErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "conform failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConformErrors {}

impl IntoIterator for ConformErrors {
    type Item = ConformError;
    type IntoIter = std::vec::IntoIter<ConformError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConformErrors {
    type Item = &'a ConformError;
    type IntoIter = std::slice::Iter<'a, ConformError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ConformErrors>();
    assert_sync::<ConformErrors>();
};
