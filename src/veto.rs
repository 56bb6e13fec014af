//! Compiled validators and the result object consumers receive.
//!
//! [`veto`] wraps an object shape into a reusable [`Veto`] instance exposing
//! [`validate`](Veto::validate) and [`validate_async`](Veto::validate_async).
//! Both return a [`VetoResult`]: `success` plus exactly one of `data` (the
//! validated values) or `errors` (the nested [`ErrorTree`]).

use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use stillwater::Validation;

use crate::issue::{Issue, Issues};
use crate::path::JsonPath;
use crate::schema::{ObjectSchema, SchemaLike};
use crate::tree::{format_issues, ErrorTree};

/// Error type asynchronous rules may fail with.
///
/// A failing rule — a network lookup that errored, a backend that timed out —
/// is converted into a `custom` issue on the rule's field; it never aborts
/// the validation of sibling fields.
pub type RuleError = Box<dyn std::error::Error + Send + Sync>;

/// A validation rule that needs an environment to run.
///
/// The environment carries whatever the rule depends on — a database handle,
/// an HTTP client, a cache. Rules report found problems as issues via the
/// returned `Validation`; operational failure of the rule itself is the `Err`
/// branch.
///
/// # Example
///
/// ```rust
/// use veto::{AsyncRule, Issue, Issues, JsonPath, RuleError};
/// use serde_json::Value;
/// use stillwater::Validation;
///
/// struct UniqueUsername;
///
/// struct Env {
///     taken: Vec<String>,
/// }
///
/// impl AsyncRule<Env> for UniqueUsername {
///     fn check(
///         &self,
///         value: &Value,
///         path: &JsonPath,
///         env: &Env,
///     ) -> Result<Validation<(), Issues>, RuleError> {
///         let name = value.as_str().unwrap_or_default();
///         if env.taken.iter().any(|t| t == name) {
///             Ok(Validation::Failure(Issues::single(Issue::custom(
///                 path.clone(),
///                 "Username already exists",
///             ))))
///         } else {
///             Ok(Validation::Success(()))
///         }
///     }
/// }
/// ```
pub trait AsyncRule<E>: Send + Sync {
    /// Checks `value` (the raw field value) at `path` using `env`.
    fn check(
        &self,
        value: &Value,
        path: &JsonPath,
        env: &E,
    ) -> Result<Validation<(), Issues>, RuleError>;
}

/// An async rule bound to a top-level field.
struct FieldRule<E> {
    field: String,
    rule: Box<dyn AsyncRule<E>>,
}

/// The result of running a validator.
///
/// Exactly one of `data`/`errors` is populated, and `success` agrees with
/// which one. Failed validation never exposes partial data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VetoResult {
    /// Whether validation passed.
    pub success: bool,
    /// The validated (possibly transformed) values; `None` on failure.
    pub data: Option<Value>,
    /// The nested error tree; `None` on success.
    pub errors: Option<ErrorTree>,
}

impl VetoResult {
    fn passed(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: None,
        }
    }

    fn failed(issues: Issues, input: &Value) -> Self {
        Self {
            success: false,
            data: None,
            errors: Some(format_issues(issues, input)),
        }
    }

    /// True if validation passed.
    pub fn is_success(&self) -> bool {
        self.success
    }
}

/// A compiled, reusable validator built from an object shape.
///
/// Construct with [`veto`]; extend with [`and`](Veto::and) (which returns a
/// new instance — existing ones never change); attach environment-dependent
/// rules with [`with_rule`](Veto::with_rule).
///
/// # Example
///
/// ```rust
/// use veto::{veto, Schema};
/// use serde_json::json;
///
/// let instance = veto(
///     Schema::object()
///         .field("name", Schema::string().min(2))
///         .field("age", Schema::number().min(0.0)),
/// );
///
/// let result = instance.validate(&json!({"name": "Ada", "age": 36}));
/// assert!(result.success);
/// assert_eq!(result.data.unwrap()["name"], json!("Ada"));
///
/// let result = instance.validate(&json!({"name": "Ada", "age": -1}));
/// assert!(!result.success);
/// assert!(result.data.is_none());
/// ```
pub struct Veto<E = ()> {
    shape: ObjectSchema,
    rules: Vec<FieldRule<E>>,
}

/// Wraps an object shape into a [`Veto`] instance.
pub fn veto(shape: ObjectSchema) -> Veto {
    Veto::new(shape)
}

impl<E> Veto<E> {
    /// Creates an instance over `shape` with no async rules.
    pub fn new(shape: ObjectSchema) -> Self {
        Self {
            shape,
            rules: Vec::new(),
        }
    }

    /// Attaches an async rule to a top-level field.
    pub fn with_rule<R>(mut self, field: impl Into<String>, rule: R) -> Self
    where
        R: AsyncRule<E> + 'static,
    {
        self.rules.push(FieldRule {
            field: field.into(),
            rule: Box::new(rule),
        });
        self
    }

    /// Returns a new instance enforcing both this instance's shape and
    /// `other`'s, with both rule sets.
    pub fn and(mut self, other: Veto<E>) -> Self {
        self.shape = self.shape.merge(other.shape);
        self.rules.extend(other.rules);
        self
    }

    /// The underlying object shape.
    pub fn shape(&self) -> &ObjectSchema {
        &self.shape
    }

    /// Validates synchronously. Async rules do not run here; use
    /// [`validate_async`](Self::validate_async) for schemas that carry them.
    pub fn validate(&self, values: &Value) -> VetoResult {
        match self.shape.validate(values, &JsonPath::root()) {
            Validation::Success(data) => VetoResult::passed(data),
            Validation::Failure(issues) => VetoResult::failed(issues, values),
        }
    }

    /// Validates structure first, then runs every applicable async rule
    /// concurrently.
    ///
    /// A rule applies when its field is present in the input and free of
    /// structural issues. All applicable rules run — across all fields — and
    /// the result is assembled only after every one has settled; a rule
    /// erroring out becomes a `custom` issue on its field without disturbing
    /// the others.
    pub fn validate_async(&self, values: &Value, env: &E) -> VetoResult
    where
        E: Sync,
    {
        let (mut issues, data) = match self.shape.validate(values, &JsonPath::root()) {
            Validation::Success(data) => (Vec::new(), Some(data)),
            Validation::Failure(e) => (e.into_vec(), None),
        };

        let applicable: Vec<(&FieldRule<E>, &Value)> = self
            .rules
            .iter()
            .filter(|r| {
                !issues
                    .iter()
                    .any(|issue| issue.path.leading_field() == Some(r.field.as_str()))
            })
            .filter_map(|r| values.get(&r.field).map(|v| (r, v)))
            .collect();

        let rule_issues: Vec<Issue> = applicable
            .par_iter()
            .flat_map(|(field_rule, value)| {
                let path = JsonPath::from_field(&field_rule.field);
                match field_rule.rule.check(value, &path, env) {
                    Ok(Validation::Success(())) => Vec::new(),
                    Ok(Validation::Failure(e)) => e.into_vec(),
                    Err(err) => vec![Issue::custom(
                        path,
                        format!("Validation rule failed: {}", err),
                    )],
                }
            })
            .collect();
        issues.extend(rule_issues);

        if issues.is_empty() {
            match data {
                Some(data) => VetoResult::passed(data),
                // Unreachable in practice: no data means structural issues.
                None => VetoResult::passed(Value::Null),
            }
        } else {
            VetoResult::failed(Issues::from_vec(issues), values)
        }
    }
}
