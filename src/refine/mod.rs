//! Refinement rules layered onto base schemas.
//!
//! A refinement attaches named checks — custom predicates, blacklists,
//! uniqueness — to a schema without touching its structural validation. Rules
//! run in a fixed order (custom first, then the type-specific rules), every
//! rule runs even after an earlier one failed, and rule issues accumulate
//! alongside structural issues instead of replacing them. The only thing that
//! skips rules entirely is an optional field that is absent.

mod array;
mod object;
mod string;

pub use array::{refine_array, ArrayRules, RefinedArray, Unique};
pub use object::{refine_object, ObjectRules};
pub use string::{refine_string, Blacklist, NoConsecutive, RefinedString, StringRules};

use crate::issue::Issue;
use crate::path::JsonPath;

/// Issue-reporting context handed to refinement rules.
///
/// Issues added without a path land at the node the rule is attached to; a
/// relative path addresses a spot inside it (a field of the refined object,
/// a position inside an array element).
///
/// # Example
///
/// ```rust
/// use veto::{JsonPath, RefineCtx};
///
/// let mut ctx = RefineCtx::new(JsonPath::from_field("items"));
/// ctx.add_issue("flagged");
/// ctx.add_issue_at(JsonPath::root().push_index(2), "bad element");
///
/// let issues = ctx.into_issues();
/// assert_eq!(issues[0].path.to_string(), "items");
/// assert_eq!(issues[1].path.to_string(), "items[2]");
/// ```
pub struct RefineCtx {
    base: JsonPath,
    issues: Vec<Issue>,
}

impl RefineCtx {
    /// A context reporting at `base`.
    pub fn new(base: JsonPath) -> Self {
        Self {
            base,
            issues: Vec::new(),
        }
    }

    /// Adds a `custom` issue at the node this rule is attached to.
    pub fn add_issue(&mut self, message: impl Into<String>) {
        self.issues.push(Issue::custom(self.base.clone(), message));
    }

    /// Adds a `custom` issue at `relative`, resolved against this rule's
    /// node.
    pub fn add_issue_at(&mut self, relative: JsonPath, message: impl Into<String>) {
        self.issues
            .push(Issue::custom(self.base.join(&relative), message));
    }

    /// Adds a fully-built issue as-is.
    ///
    /// The issue's path is taken verbatim; use this when a rule needs a code
    /// other than `custom` or metadata beyond a message.
    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// The path this context reports at.
    pub fn path(&self) -> &JsonPath {
        &self.base
    }

    /// Consumes the context, yielding the collected issues in report order.
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}
