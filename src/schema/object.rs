//! Object schema: strict shapes with required/optional fields and
//! cross-field rules.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::issue::{Issue, IssueCode, Issues};
use crate::path::JsonPath;
use crate::refine::RefineCtx;

use super::traits::{value_type_name, SchemaLike};

/// Cross-field rule run after per-field validation.
pub(crate) type ObjectRuleFn = Arc<dyn Fn(&Map<String, Value>, &mut RefineCtx) + Send + Sync>;

/// Definition of one field in an object shape.
#[derive(Clone)]
struct FieldDef {
    schema: Arc<dyn SchemaLike>,
    required: bool,
}

/// How keys outside the shape are treated.
#[derive(Clone, Copy, PartialEq, Eq)]
enum UnknownKeys {
    /// Reject with a single `unrecognized_keys` issue (default).
    Strict,
    /// Copy unknown keys into the output untouched.
    Passthrough,
}

/// A schema for JSON objects.
///
/// Shapes are strict by default: keys the shape does not declare produce one
/// `unrecognized_keys` issue at the object's own path, while declared keys
/// keep validating normally. Fields are required unless added with
/// [`optional`](Self::optional); a missing required field reports
/// `invalid_type` / "Field is required" rather than throwing.
///
/// # Example
///
/// ```rust
/// use veto::{JsonPath, Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string())
///     .optional("nickname", Schema::string());
///
/// assert!(schema
///     .validate(&json!({"name": "Ada"}), &JsonPath::root())
///     .is_success());
///
/// // Unknown key: rejected by the strict default.
/// assert!(schema
///     .validate(&json!({"name": "Ada", "extra": 1}), &JsonPath::root())
///     .is_failure());
/// ```
#[derive(Clone)]
pub struct ObjectSchema {
    fields: IndexMap<String, FieldDef>,
    unknown_keys: UnknownKeys,
    rules: Vec<ObjectRuleFn>,
}

impl ObjectSchema {
    /// Creates an empty strict shape.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            unknown_keys: UnknownKeys::Strict,
            rules: Vec::new(),
        }
    }

    /// Adds a required field.
    pub fn field<S: SchemaLike + 'static>(mut self, name: impl Into<String>, schema: S) -> Self {
        self.fields.insert(
            name.into(),
            FieldDef {
                schema: Arc::new(schema),
                required: true,
            },
        );
        self
    }

    /// Adds an optional field.
    ///
    /// An absent optional field is skipped entirely: no structural checks, no
    /// refinement rules, no issues.
    pub fn optional<S: SchemaLike + 'static>(mut self, name: impl Into<String>, schema: S) -> Self {
        self.fields.insert(
            name.into(),
            FieldDef {
                schema: Arc::new(schema),
                required: false,
            },
        );
        self
    }

    /// Allows keys outside the shape, copying them into the output.
    pub fn passthrough(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Passthrough;
        self
    }

    /// Attaches a cross-field rule.
    ///
    /// Rules run after per-field validation, against the raw input map, and
    /// report through the [`RefineCtx`]: issues default to the object's own
    /// node unless the rule addresses a field explicitly. Rule issues
    /// accumulate with field issues; they never replace them.
    pub fn refine<F>(mut self, rule: F) -> Self
    where
        F: Fn(&Map<String, Value>, &mut RefineCtx) + Send + Sync + 'static,
    {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Merges two shapes into one that enforces both.
    ///
    /// Keys present in both are validated by both sides; strictness wins if
    /// either side is strict; cross-field rules concatenate. This is the
    /// engine behind [`and`](crate::and) and is associative: either grouping
    /// of three shapes validates in the same left-to-right order.
    pub fn merge(mut self, other: ObjectSchema) -> Self {
        for (name, def) in other.fields {
            match self.fields.get_mut(&name) {
                Some(existing) => {
                    existing.schema = Arc::new(BothSchema {
                        first: Arc::clone(&existing.schema),
                        second: def.schema,
                    });
                    existing.required = existing.required || def.required;
                }
                None => {
                    self.fields.insert(name, def);
                }
            }
        }
        if other.unknown_keys == UnknownKeys::Strict {
            self.unknown_keys = UnknownKeys::Strict;
        }
        self.rules.extend(other.rules);
        self
    }

    /// Field names declared by this shape, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => {
                return Validation::Failure(Issues::single(
                    Issue::new(
                        IssueCode::InvalidType,
                        path.clone(),
                        format!("Expected object, received {}", value_type_name(value)),
                    )
                    .with_expected("object")
                    .with_received(value_type_name(value)),
                ));
            }
        };

        let mut issues = Vec::new();
        let mut validated = Map::new();

        for (name, def) in &self.fields {
            let field_path = path.push_field(name);
            match obj.get(name) {
                Some(field_value) => match def.schema.validate(field_value, &field_path) {
                    Validation::Success(v) => {
                        validated.insert(name.clone(), v);
                    }
                    Validation::Failure(e) => issues.extend(e),
                },
                None if def.required => {
                    issues.push(
                        Issue::new(IssueCode::InvalidType, field_path, "Field is required")
                            .with_received("undefined"),
                    );
                }
                None => {}
            }
        }

        let unknown: Vec<String> = obj
            .keys()
            .filter(|k| !self.fields.contains_key(*k))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            match self.unknown_keys {
                UnknownKeys::Strict => {
                    let listed: Vec<String> =
                        unknown.iter().map(|k| format!("'{}'", k)).collect();
                    issues.push(
                        Issue::new(
                            IssueCode::UnrecognizedKeys,
                            path.clone(),
                            format!("Unrecognized key(s) in object: {}", listed.join(", ")),
                        )
                        .with_keys(unknown),
                    );
                }
                UnknownKeys::Passthrough => {
                    for key in unknown {
                        if let Some(v) = obj.get(&key) {
                            validated.insert(key, v.clone());
                        }
                    }
                }
            }
        }

        for rule in &self.rules {
            let mut ctx = RefineCtx::new(path.clone());
            rule(obj, &mut ctx);
            issues.extend(ctx.into_issues());
        }

        if issues.is_empty() {
            Validation::Success(Value::Object(validated))
        } else {
            Validation::Failure(Issues::from_vec(issues))
        }
    }
}

/// Validates a value against two schemas in sequence, accumulating issues
/// from both. On success the second schema's output wins.
pub(crate) struct BothSchema {
    pub(crate) first: Arc<dyn SchemaLike>,
    pub(crate) second: Arc<dyn SchemaLike>,
}

impl SchemaLike for BothSchema {
    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        let mut issues = Vec::new();
        let first = match self.first.validate(value, path) {
            Validation::Success(v) => Some(v),
            Validation::Failure(e) => {
                issues.extend(e);
                None
            }
        };
        let second = match self.second.validate(value, path) {
            Validation::Success(v) => Some(v),
            Validation::Failure(e) => {
                issues.extend(e);
                None
            }
        };

        if issues.is_empty() {
            match second.or(first) {
                Some(v) => Validation::Success(v),
                None => Validation::Success(value.clone()),
            }
        } else {
            Validation::Failure(Issues::from_vec(issues))
        }
    }
}
