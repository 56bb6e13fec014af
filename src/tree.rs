//! Nesting flat issue lists into path-addressed error trees.
//!
//! Validation produces a flat list of [`Issue`]s, each addressed by its path.
//! Consumers want errors shaped like the value they submitted: this module
//! nests issues into an [`ErrorTree`] whose keys mirror the input's fields
//! and indices (indices become string keys, so `items[1]` lands under
//! `"items"` → `"1"`).
//!
//! Two node representations exist and both must be preserved:
//!
//! - a field holding an **array or object** collects its direct issues in an
//!   `_errors` array alongside nested children,
//! - a **scalar** field (or a missing one) is a bare array of issues.
//!
//! [`format_issues`] is a pure function: the same issue list and input always
//! produce the same tree, no issue is dropped, and relative order within a
//! node follows the flat list.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::issue::Issue;
use crate::path::{JsonPath, PathSegment};

/// A node below the root of an [`ErrorTree`].
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorNode {
    /// Issues on a scalar field; serializes as a bare array.
    Leaf(Vec<Issue>),
    /// Issues on a container field; serializes as `{"_errors": [...], ...children}`.
    Branch(ErrorTree),
}

impl ErrorNode {
    /// Issues terminating directly at this node (`_errors` for a branch, the
    /// whole array for a leaf).
    pub fn direct(&self) -> &[Issue] {
        match self {
            ErrorNode::Leaf(issues) => issues,
            ErrorNode::Branch(tree) => tree.errors(),
        }
    }

    /// Child node under `key`, if this node is a branch with one.
    pub fn get(&self, key: &str) -> Option<&ErrorNode> {
        match self {
            ErrorNode::Leaf(_) => None,
            ErrorNode::Branch(tree) => tree.get(key),
        }
    }

    /// Total number of issues in this subtree.
    pub fn issue_count(&self) -> usize {
        match self {
            ErrorNode::Leaf(issues) => issues.len(),
            ErrorNode::Branch(tree) => tree.issue_count(),
        }
    }
}

/// The nested error structure mirroring a validated value's shape.
///
/// The root and every container-valued field are branch nodes: direct issues
/// live in `_errors`, nested fields under their key. Scalar fields appear as
/// bare issue arrays.
///
/// # Example
///
/// ```rust
/// use veto::{format_issues, Issue, IssueCode, JsonPath};
/// use serde_json::json;
///
/// let input = json!({"tags": ["a", 1]});
/// let issues = vec![
///     Issue::new(
///         IssueCode::InvalidType,
///         JsonPath::from_field("tags").push_index(1),
///         "Expected string, received number",
///     ),
/// ];
///
/// let tree = format_issues(issues, &input);
/// let element = tree.get("tags").unwrap().get("1").unwrap();
/// assert_eq!(element.direct()[0].code, IssueCode::InvalidType);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorTree {
    errors: Vec<Issue>,
    children: IndexMap<String, ErrorNode>,
}

impl ErrorTree {
    /// Issues terminating at this node.
    pub fn errors(&self) -> &[Issue] {
        &self.errors
    }

    /// Child node under `key`.
    pub fn get(&self, key: &str) -> Option<&ErrorNode> {
        self.children.get(key)
    }

    /// Iterates over `(key, child)` pairs in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &ErrorNode)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// True if the tree holds no issues anywhere.
    pub fn is_empty(&self) -> bool {
        self.issue_count() == 0
    }

    /// Total number of issues in the tree.
    ///
    /// Formatting never drops or duplicates: this always equals the length of
    /// the flat list the tree was built from.
    pub fn issue_count(&self) -> usize {
        self.errors.len()
            + self
                .children
                .values()
                .map(ErrorNode::issue_count)
                .sum::<usize>()
    }
}

impl Serialize for ErrorTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.children.len() + 1))?;
        map.serialize_entry("_errors", &self.errors)?;
        for (key, child) in &self.children {
            map.serialize_entry(key, child)?;
        }
        map.end()
    }
}

impl Serialize for ErrorNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ErrorNode::Leaf(issues) => issues.serialize(serializer),
            ErrorNode::Branch(tree) => tree.serialize(serializer),
        }
    }
}

/// Nests a flat issue list into an [`ErrorTree`].
///
/// `input` is the value that was validated; it decides the representation at
/// each terminal node (container → `_errors`, scalar or absent → bare
/// array). Issues are placed in order, so multiple issues at one path keep
/// their relative order.
pub fn format_issues(issues: impl IntoIterator<Item = Issue>, input: &Value) -> ErrorTree {
    let mut tree = ErrorTree::default();
    for issue in issues {
        insert_issue(&mut tree, issue, input);
    }
    tree
}

fn insert_issue(tree: &mut ErrorTree, issue: Issue, input: &Value) {
    let segments: Vec<PathSegment> = issue.path.segments().cloned().collect();
    if segments.is_empty() {
        tree.errors.push(issue);
        return;
    }

    let mut node = tree;
    let mut cursor = Some(input);

    for (depth, segment) in segments.iter().enumerate() {
        let key = segment.tree_key();
        let child_value = cursor.and_then(|v| resolve(v, segment));

        if depth + 1 == segments.len() {
            place_terminal(node, key, issue, child_value);
            return;
        }

        let child = node
            .children
            .entry(key)
            .or_insert_with(|| ErrorNode::Branch(ErrorTree::default()));
        promote(child);
        node = match child {
            ErrorNode::Branch(branch) => branch,
            ErrorNode::Leaf(_) => unreachable!("leaf promoted to branch above"),
        };
        cursor = child_value;
    }
}

fn resolve<'a>(value: &'a Value, segment: &PathSegment) -> Option<&'a Value> {
    match segment {
        PathSegment::Field(name) => value.get(name),
        PathSegment::Index(idx) => value.get(idx),
    }
}

fn place_terminal(node: &mut ErrorTree, key: String, issue: Issue, target: Option<&Value>) {
    let container = matches!(target, Some(Value::Array(_)) | Some(Value::Object(_)));
    match node.children.entry(key) {
        indexmap::map::Entry::Vacant(entry) => {
            if container {
                let mut branch = ErrorTree::default();
                branch.errors.push(issue);
                entry.insert(ErrorNode::Branch(branch));
            } else {
                entry.insert(ErrorNode::Leaf(vec![issue]));
            }
        }
        indexmap::map::Entry::Occupied(mut entry) => match entry.get_mut() {
            ErrorNode::Leaf(issues) if !container => issues.push(issue),
            child => {
                // A node that already has (or needs) children keeps every
                // direct issue in _errors.
                promote(child);
                match child {
                    ErrorNode::Branch(branch) => branch.errors.push(issue),
                    ErrorNode::Leaf(_) => unreachable!("leaf promoted to branch above"),
                }
            }
        },
    }
}

/// Converts a leaf into a branch, moving its issues into `_errors`.
fn promote(node: &mut ErrorNode) {
    if let ErrorNode::Leaf(issues) = node {
        let moved = std::mem::take(issues);
        *node = ErrorNode::Branch(ErrorTree {
            errors: moved,
            children: IndexMap::new(),
        });
    }
}
