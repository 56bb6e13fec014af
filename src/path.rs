//! Paths addressing values inside nested JSON input.
//!
//! Every [`Issue`](crate::Issue) carries a [`JsonPath`] locating the value it
//! refers to. The error-tree formatter walks these segments to place issues,
//! and the serialized form is a plain array mixing strings and numbers
//! (`["items", 1, "name"]`).

use std::fmt::{self, Display};

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// One step of a [`JsonPath`]: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object property access (`user`, `email`).
    Field(String),
    /// Array element access (`[0]`, `[42]`).
    Index(usize),
}

impl PathSegment {
    /// The key this segment uses when nested into an error tree.
    ///
    /// Indices become string keys, so `items[1]` lands under `"items"` →
    /// `"1"`.
    pub fn tree_key(&self) -> String {
        match self {
            PathSegment::Field(name) => name.clone(),
            PathSegment::Index(idx) => idx.to_string(),
        }
    }
}

/// An immutable path to a value in nested JSON input.
///
/// Paths grow by returning new values; pushing never mutates the original,
/// which lets sibling fields share a common prefix.
///
/// # Example
///
/// ```rust
/// use veto::JsonPath;
///
/// let path = JsonPath::root().push_field("users").push_index(1).push_field("email");
/// assert_eq!(path.to_string(), "users[1].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The empty path addressing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// A path consisting of a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns a new path with all of `suffix`'s segments appended.
    ///
    /// Used to resolve relative paths, e.g. a uniqueness rule pointing inside
    /// each duplicate element.
    pub fn join(&self, suffix: &JsonPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(suffix.segments.iter().cloned());
        Self { segments }
    }

    /// True if this path has no segments.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over the segments from the root outward.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// The first field name on this path, if the path starts with one.
    ///
    /// Top-level form fields always do; the async-rule scheduler uses this to
    /// match issues and rules to their field.
    pub fn leading_field(&self) -> Option<&str> {
        match self.segments.first() {
            Some(PathSegment::Field(name)) => Some(name),
            _ => None,
        }
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

impl Serialize for PathSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PathSegment::Field(name) => serializer.serialize_str(name),
            PathSegment::Index(idx) => serializer.serialize_u64(*idx as u64),
        }
    }
}

impl Serialize for JsonPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.segments.len()))?;
        for segment in &self.segments {
            seq.serialize_element(segment)?;
        }
        seq.end()
    }
}
