//! Object refinements: cross-field rules.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::schema::ObjectSchema;

use super::RefineCtx;

/// The rule set for a refined object.
///
/// Object rules are cross-field by nature, so the only rule kind is `custom`;
/// it runs after per-field validation, against the raw input map, and its
/// issues default to the object's own node unless given a path.
#[derive(Clone, Default)]
pub struct ObjectRules {
    custom: Option<Arc<dyn Fn(&Map<String, Value>, &mut RefineCtx) + Send + Sync>>,
}

impl ObjectRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn custom<F>(mut self, rule: F) -> Self
    where
        F: Fn(&Map<String, Value>, &mut RefineCtx) + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(rule));
        self
    }
}

/// Attaches cross-field rules to an object shape.
///
/// # Example
///
/// ```rust
/// use veto::{refine_object, JsonPath, ObjectRules, Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = refine_object(
///     Schema::object()
///         .field("password", Schema::string())
///         .field("confirm", Schema::string()),
///     ObjectRules::new().custom(|obj, ctx| {
///         if obj.get("password") != obj.get("confirm") {
///             ctx.add_issue_at(
///                 JsonPath::from_field("confirm"),
///                 "Passwords do not match",
///             );
///         }
///     }),
/// );
///
/// let result = schema.validate(
///     &json!({"password": "hunter2", "confirm": "hunter3"}),
///     &JsonPath::root(),
/// );
/// assert!(result.is_failure());
/// ```
pub fn refine_object(base: ObjectSchema, rules: ObjectRules) -> ObjectSchema {
    match rules.custom {
        Some(rule) => base.refine(move |obj, ctx| rule(obj, ctx)),
        None => base,
    }
}
