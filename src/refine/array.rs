//! Array refinements: custom checks and uniqueness.

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::issue::{Issue, IssueCode, Issues};
use crate::path::JsonPath;
use crate::schema::{ArraySchema, SchemaLike};

use super::RefineCtx;

type CustomFn = Arc<dyn Fn(&[Value], &mut RefineCtx) + Send + Sync>;
type MapFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Uniqueness rule for array elements.
///
/// Elements compare by structural (deep) equality, or by the result of a map
/// function when one is given. The first occurrence of each key is kept;
/// every later duplicate gets a `not_unique` issue at its own node — or at
/// `element_error_path` inside it — and the array itself gets exactly one
/// top-level `not_unique` issue whenever at least one duplicate exists.
#[derive(Clone, Default)]
pub struct Unique {
    map_fn: Option<MapFn>,
    element_error_path: Option<JsonPath>,
}

impl Unique {
    /// Compare whole elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `map_fn(element)` results instead of whole elements.
    pub fn by<F>(mut self, map_fn: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.map_fn = Some(Arc::new(map_fn));
        self
    }

    /// Place each duplicate's issue at this path inside the element.
    pub fn at(mut self, element_error_path: JsonPath) -> Self {
        self.element_error_path = Some(element_error_path);
        self
    }

    fn apply(&self, items: &[Value], path: &JsonPath, issues: &mut Vec<Issue>) {
        let keys: Vec<Value> = match &self.map_fn {
            Some(map_fn) => items.iter().map(|item| map_fn(item)).collect(),
            None => items.to_vec(),
        };

        let mut duplicate_indices = Vec::new();
        for (i, key) in keys.iter().enumerate() {
            if keys[..i].contains(key) {
                duplicate_indices.push(i);
            }
        }

        for &index in &duplicate_indices {
            let mut element_path = path.push_index(index);
            if let Some(inner) = &self.element_error_path {
                element_path = element_path.join(inner);
            }
            issues.push(Issue::new(
                IssueCode::NotUnique,
                element_path,
                "Element already exists",
            ));
        }

        if !duplicate_indices.is_empty() {
            issues.push(Issue::new(
                IssueCode::NotUnique,
                path.clone(),
                "Array elements are not unique",
            ));
        }
    }
}

/// The rule set a refined array runs, in order: `custom`, then `unique`.
#[derive(Clone, Default)]
pub struct ArrayRules {
    custom: Option<CustomFn>,
    unique: Option<Unique>,
}

impl ArrayRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// A free-form check over the whole (raw) element slice.
    pub fn custom<F>(mut self, rule: F) -> Self
    where
        F: Fn(&[Value], &mut RefineCtx) + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(rule));
        self
    }

    pub fn unique(mut self, unique: Unique) -> Self {
        self.unique = Some(unique);
        self
    }
}

/// An array schema with refinement rules attached.
///
/// Structural issues (length bounds, malformed elements) and rule issues
/// accumulate in one result: a too-small string in one element and a
/// uniqueness violation in another surface together.
pub struct RefinedArray {
    base: ArraySchema,
    rules: ArrayRules,
}

/// Attaches rules to an array schema.
///
/// # Example
///
/// ```rust
/// use veto::{refine_array, ArrayRules, JsonPath, Schema, SchemaLike, Unique};
/// use serde_json::json;
///
/// let schema = refine_array(
///     Schema::array(Schema::string()),
///     ArrayRules::new().unique(Unique::new()),
/// );
///
/// assert!(schema.validate(&json!(["a", "b", "c"]), &JsonPath::root()).is_success());
/// assert!(schema.validate(&json!(["a", "b", "a"]), &JsonPath::root()).is_failure());
/// ```
pub fn refine_array(base: ArraySchema, rules: ArrayRules) -> RefinedArray {
    RefinedArray { base, rules }
}

impl SchemaLike for RefinedArray {
    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        let items = match value.as_array() {
            Some(a) => a,
            None => return Validation::Failure(Issues::single(self.base.type_issue(value, path))),
        };

        let (mut issues, validated) = self.base.check(items, path);

        if let Some(custom) = &self.rules.custom {
            let mut ctx = RefineCtx::new(path.clone());
            custom(items, &mut ctx);
            issues.extend(ctx.into_issues());
        }
        if let Some(unique) = &self.rules.unique {
            unique.apply(items, path, &mut issues);
        }

        if issues.is_empty() {
            Validation::Success(Value::Array(validated))
        } else {
            Validation::Failure(Issues::from_vec(issues))
        }
    }
}
