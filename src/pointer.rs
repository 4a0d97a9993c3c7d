//! JSON-Pointer representation for locating values in nested structures.
//!
//! This module provides [`Pointer`] and [`PointerSegment`] types for building
//! and rendering RFC 6901 paths to values in nested structures. The empty
//! pointer `""` denotes the root being conformed.

use std::fmt::{self, Display};

/// A segment of a JSON Pointer.
///
/// Pointers are built from segments that represent either keyed access
/// into a mapping or indexed access into a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PointerSegment {
    /// A mapping-key reference token (e.g. `name`, `a/b`).
    Token(String),
    /// A sequence index (e.g. `0`, `42`).
    Index(usize),
}

impl PointerSegment {
    /// Creates a new token segment.
    pub fn token(name: impl Into<String>) -> Self {
        PointerSegment::Token(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PointerSegment::Index(idx)
    }
}

impl Display for PointerSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // RFC 6901 escaping: "~" -> "~0", "/" -> "~1".
            PointerSegment::Token(name) => {
                for ch in name.chars() {
                    match ch {
                        '~' => f.write_str("~0")?,
                        '/' => f.write_str("~1")?,
                        _ => write!(f, "{}", ch)?,
                    }
                }
                Ok(())
            }
            PointerSegment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// An RFC 6901 path to a value in a nested structure.
///
/// `Pointer` represents locations like `/users/0/email` and provides
/// methods for building paths incrementally. The root pointer renders
/// as the empty string.
///
/// # Example
///
/// ```rust
/// use conformal::Pointer;
///
/// let path = Pointer::root()
///     .push_token("users")
///     .push_index(0)
///     .push_token("email");
///
/// assert_eq!(path.to_string(), "/users/0/email");
/// assert_eq!(Pointer::root().to_string(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Pointer {
    segments: Vec<PointerSegment>,
}

impl Pointer {
    /// Creates an empty pointer representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a pointer from a single token segment.
    pub fn from_token(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PointerSegment::Token(name.into())],
        }
    }

    /// Creates a pointer from a single index segment.
    pub fn from_index(idx: usize) -> Self {
        Self {
            segments: vec![PointerSegment::Index(idx)],
        }
    }

    /// Returns a new pointer with a token segment appended.
    ///
    /// This method does not modify the original pointer; it returns a new one.
    pub fn push_token(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PointerSegment::Token(name.into()));
        Self { segments }
    }

    /// Returns a new pointer with an index segment appended.
    ///
    /// This method does not modify the original pointer; it returns a new one.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PointerSegment::Index(index));
        Self { segments }
    }

    /// Returns a new pointer with the given segment prepended.
    ///
    /// Containers use this to re-base descendant error paths under their
    /// own fragment.
    pub fn prepend(&self, segment: PointerSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.push(segment);
        segments.extend(self.segments.iter().cloned());
        Self { segments }
    }

    /// Returns true if this is the root pointer (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this pointer.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this pointer has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the pointer segments.
    pub fn segments(&self) -> impl Iterator<Item = &PointerSegment> {
        self.segments.iter()
    }

    /// Returns the parent pointer (all segments except the last), or None
    /// if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the first segment, or None if this is root.
    pub fn first(&self) -> Option<&PointerSegment> {
        self.segments.first()
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PointerSegment> {
        self.segments.last()
    }
}

impl Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_pointer_is_empty() {
        let path = Pointer::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_single_token() {
        let path = Pointer::root().push_token("user");
        assert_eq!(path.to_string(), "/user");
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_single_index() {
        let path = Pointer::root().push_index(0);
        assert_eq!(path.to_string(), "/0");
    }

    #[test]
    fn test_nested_tokens() {
        let path = Pointer::root().push_token("user").push_token("email");
        assert_eq!(path.to_string(), "/user/email");
    }

    #[test]
    fn test_token_with_index() {
        let path = Pointer::root().push_token("items").push_index(3);
        assert_eq!(path.to_string(), "/items/3");
    }

    #[test]
    fn test_rfc6901_escaping() {
        let path = Pointer::root().push_token("a/b").push_token("m~n");
        assert_eq!(path.to_string(), "/a~1b/m~0n");
    }

    #[test]
    fn test_prepend_rebases_under_fragment() {
        let path = Pointer::root().push_token("email");
        let rebased = path.prepend(PointerSegment::token("user"));
        assert_eq!(rebased.to_string(), "/user/email");

        let indexed = Pointer::root().prepend(PointerSegment::index(2));
        assert_eq!(indexed.to_string(), "/2");
    }

    #[test]
    fn test_pointer_immutability() {
        let base = Pointer::root().push_token("users");
        let path_a = base.push_index(0);
        let path_b = base.push_index(1);

        assert_eq!(base.to_string(), "/users");
        assert_eq!(path_a.to_string(), "/users/0");
        assert_eq!(path_b.to_string(), "/users/1");
    }

    #[test]
    fn test_parent_pointer() {
        let path = Pointer::root()
            .push_token("users")
            .push_index(0)
            .push_token("email");

        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "/users/0");

        let grandparent = parent.parent().unwrap();
        assert_eq!(grandparent.to_string(), "/users");

        let root = grandparent.parent().unwrap();
        assert!(root.is_root());
        assert!(root.parent().is_none());
    }

    #[test]
    fn test_first_and_last_segments() {
        let path = Pointer::root().push_token("users").push_index(0);
        assert_eq!(path.first(), Some(&PointerSegment::Token("users".into())));
        assert_eq!(path.last(), Some(&PointerSegment::Index(0)));

        let root = Pointer::root();
        assert_eq!(root.first(), None);
        assert_eq!(root.last(), None);
    }

    #[test]
    fn test_from_constructors() {
        assert_eq!(Pointer::from_token("name").to_string(), "/name");
        assert_eq!(Pointer::from_index(5).to_string(), "/5");
    }

    #[test]
    fn test_equality() {
        let path1 = Pointer::root().push_token("a").push_index(0);
        let path2 = Pointer::root().push_token("a").push_index(0);
        let path3 = Pointer::root().push_token("a").push_index(1);

        assert_eq!(path1, path2);
        assert_ne!(path1, path3);
    }
}
