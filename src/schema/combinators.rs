//! Combining object shapes.

use super::object::ObjectSchema;

/// Merges two object shapes into one that enforces both.
///
/// Keys declared by both sides are validated by both schemas (every issue
/// from either side accumulates); keys declared by only one side carry over
/// unchanged; cross-field rules from both sides run in order. The result is
/// associative: `and(and(a, b), c)` and `and(a, and(b, c))` validate any
/// input to the same outcome and issue set.
///
/// This is how dynamically-added validation layers onto a base shape — e.g.
/// a server-driven uniqueness fragment joined to a static form schema.
///
/// # Example
///
/// ```rust
/// use veto::{and, JsonPath, Schema, SchemaLike};
/// use serde_json::json;
///
/// let base = Schema::object().field("username", Schema::string().min(2));
/// let extra = Schema::object().field("username", Schema::string().max(8));
///
/// let combined = and(base, extra);
/// assert!(combined
///     .validate(&json!({"username": "this one is too long"}), &JsonPath::root())
///     .is_failure());
/// ```
pub fn and(a: ObjectSchema, b: ObjectSchema) -> ObjectSchema {
    a.merge(b)
}
