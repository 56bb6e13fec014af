//! Structured validation failures and their accumulation.
//!
//! [`Issue`] is a single failure with a machine-readable code, a message, the
//! path it terminates at, and whatever code-specific metadata applies.
//! [`Issues`] is the guaranteed-non-empty collection that validation failures
//! carry; combining two of them never loses an issue.

use std::fmt::{self, Display};

use serde::Serialize;
use serde_json::{Number, Value};
use stillwater::prelude::*;

use crate::path::JsonPath;

/// Machine-readable classification of a validation failure.
///
/// The vocabulary is closed: structural codes come from schema evaluation,
/// `not_unique` from the uniqueness refinement, and `custom` from
/// user-supplied rules reporting through
/// [`RefineCtx`](crate::refine::RefineCtx).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Value has the wrong type, or a required field is missing.
    InvalidType,
    /// String/array/value below its minimum size or bound.
    TooSmall,
    /// String/array/value above its maximum size, bound, or nesting depth.
    TooBig,
    /// A strict object received keys its shape does not declare.
    UnrecognizedKeys,
    /// No variant of a discriminated union matched the discriminator value.
    InvalidUnion,
    /// Value is outside an enumerated or literal set, or fails a pattern.
    InvalidValue,
    /// Array elements are not distinct.
    NotUnique,
    /// Reported by a refinement rule.
    Custom,
}

impl IssueCode {
    /// The snake_case name used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::InvalidType => "invalid_type",
            IssueCode::TooSmall => "too_small",
            IssueCode::TooBig => "too_big",
            IssueCode::UnrecognizedKeys => "unrecognized_keys",
            IssueCode::InvalidUnion => "invalid_union",
            IssueCode::InvalidValue => "invalid_value",
            IssueCode::NotUnique => "not_unique",
            IssueCode::Custom => "custom",
        }
    }
}

impl Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation failure.
///
/// Beyond `code`, `message`, and `path`, an issue carries only the metadata
/// its code calls for: `minimum`/`maximum` for size bounds, `expected`/
/// `received` for type mismatches, `values` for enumerations, `keys` for
/// unrecognized object keys, `discriminator`/`note` for union failures.
/// Absent fields are skipped when serializing, so the wire shape stays flat.
///
/// # Example
///
/// ```rust
/// use veto::{Issue, IssueCode, JsonPath};
///
/// let issue = Issue::new(
///     IssueCode::TooSmall,
///     JsonPath::from_field("name"),
///     "String must contain at least 3 character(s)",
/// )
/// .with_minimum(3u64);
///
/// assert_eq!(issue.code, IssueCode::TooSmall);
/// assert_eq!(issue.minimum, Some(3u64.into()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    /// Machine-readable failure code.
    pub code: IssueCode,
    /// Human-readable description.
    pub message: String,
    /// Where in the input the failure terminates.
    pub path: JsonPath,
    /// Expected type or shape, for `invalid_type`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Received type, for `invalid_type`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
    /// Violated lower bound, for `too_small`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,
    /// Violated upper bound, for `too_big`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,
    /// Allowed values in declaration order, for `invalid_value`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
    /// Offending object keys, for `unrecognized_keys`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    /// Discriminator field name, for `invalid_union`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    /// Free-form qualifier, e.g. `"No matching discriminator"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Issue {
    /// Creates an issue with the given code, path, and message.
    pub fn new(code: IssueCode, path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path,
            expected: None,
            received: None,
            minimum: None,
            maximum: None,
            values: None,
            keys: None,
            discriminator: None,
            note: None,
        }
    }

    /// A `custom` issue, the shape refinement rules report.
    pub fn custom(path: JsonPath, message: impl Into<String>) -> Self {
        Self::new(IssueCode::Custom, path, message)
    }

    /// Sets the expected type/shape.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Sets the received type.
    pub fn with_received(mut self, received: impl Into<String>) -> Self {
        self.received = Some(received.into());
        self
    }

    /// Sets the violated lower bound.
    pub fn with_minimum(mut self, minimum: impl Into<Number>) -> Self {
        self.minimum = Some(minimum.into());
        self
    }

    /// Sets the violated upper bound.
    pub fn with_maximum(mut self, maximum: impl Into<Number>) -> Self {
        self.maximum = Some(maximum.into());
        self
    }

    /// Sets the allowed-value list.
    pub fn with_values(mut self, values: Vec<Value>) -> Self {
        self.values = Some(values);
        self
    }

    /// Sets the offending key list.
    pub fn with_keys(mut self, keys: Vec<String>) -> Self {
        self.keys = Some(keys);
        self
    }

    /// Sets the discriminator field name.
    pub fn with_discriminator(mut self, discriminator: impl Into<String>) -> Self {
        self.discriminator = Some(discriminator.into());
        self
    }

    /// Sets the qualifier note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };
        write!(f, "{}: [{}] {}", path_str, self.code, self.message)
    }
}

impl std::error::Error for Issue {}

/// A non-empty collection of validation issues.
///
/// Wraps a `NonEmptyVec<Issue>` so a failed validation always carries at
/// least one issue; `Semigroup::combine` concatenates two collections in
/// order, which is how errors from sibling fields accumulate.
///
/// ```rust
/// use veto::{Issue, Issues, JsonPath};
/// use stillwater::prelude::*;
///
/// let a = Issues::single(Issue::custom(JsonPath::from_field("a"), "first"));
/// let b = Issues::single(Issue::custom(JsonPath::from_field("b"), "second"));
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issues(NonEmptyVec<Issue>);

impl Issues {
    /// A collection holding one issue.
    pub fn single(issue: Issue) -> Self {
        Self(NonEmptyVec::singleton(issue))
    }

    /// Builds a collection from a vec known to be non-empty.
    ///
    /// # Panics
    ///
    /// Panics if `issues` is empty; callers assemble the vec and only wrap it
    /// once at least one issue exists.
    pub fn from_vec(issues: Vec<Issue>) -> Self {
        Self(NonEmptyVec::from_vec(issues).expect("Issues requires at least one issue"))
    }

    /// Number of issues.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is non-empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the issues in accumulation order.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    /// The first issue.
    pub fn first(&self) -> &Issue {
        self.0.head()
    }

    /// All issues carrying the given code.
    pub fn with_code(&self, code: IssueCode) -> Vec<&Issue> {
        self.0.iter().filter(|i| i.code == code).collect()
    }

    /// All issues terminating at the given path.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&Issue> {
        self.0.iter().filter(|i| &i.path == path).collect()
    }

    /// Unwraps into a plain vec.
    pub fn into_vec(self) -> Vec<Issue> {
        self.0.into_vec()
    }
}

impl Semigroup for Issues {
    fn combine(self, other: Self) -> Self {
        Issues(self.0.combine(other.0))
    }
}

impl Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "validation failed with {} issue(s):", self.len())?;
        for (i, issue) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for Issues {}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

// Issues cross thread boundaries inside rayon's parallel rule execution.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issue>();
    assert_sync::<Issue>();
    assert_send::<Issues>();
    assert_sync::<Issues>();
};
