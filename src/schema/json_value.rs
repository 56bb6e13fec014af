//! Free-form JSON value schemas.
//!
//! [`JsonSchema`] accepts any JSON value tree — string, number, boolean,
//! null, array, object, recursively — optionally bounded by a maximum
//! container-nesting depth. [`JsonParseSchema`] parses a string *as* JSON and
//! can pipe the parsed value into a second schema.

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::issue::{Issue, IssueCode, Issues};
use crate::path::JsonPath;

use super::traits::{value_type_name, SchemaLike};

/// Container nesting depth of a value: scalars are 0, a container is one
/// deeper than its deepest child.
fn nesting_depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(nesting_depth).max().unwrap_or(0),
        Value::Object(map) => 1 + map.values().map(nesting_depth).max().unwrap_or(0),
        _ => 0,
    }
}

/// A schema accepting arbitrary JSON value trees.
///
/// With a depth bound, exceeding it is a validation failure (`too_big`), not
/// an error: `json(2)` accepts `{"a": {"b": 1}}` (two container levels) and
/// rejects `{"a": {"b": {"c": 1}}}`.
///
/// # Example
///
/// ```rust
/// use veto::{JsonPath, Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::json().max_depth(2);
///
/// assert!(schema.validate(&json!({"a": {"b": 1}}), &JsonPath::root()).is_success());
/// assert!(schema.validate(&json!({"a": {"b": {"c": 1}}}), &JsonPath::root()).is_failure());
/// ```
#[derive(Clone)]
pub struct JsonSchema {
    max_depth: Option<usize>,
    require_object: bool,
}

impl JsonSchema {
    /// Any JSON value, unlimited depth.
    pub fn any() -> Self {
        Self {
            max_depth: None,
            require_object: false,
        }
    }

    /// Any JSON object, unlimited depth.
    pub fn object() -> Self {
        Self {
            max_depth: None,
            require_object: true,
        }
    }

    /// Bounds the container nesting depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

impl SchemaLike for JsonSchema {
    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        if self.require_object && !value.is_object() {
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

        if let Some(max) = self.max_depth {
            let depth = nesting_depth(value);
            if depth > max {
                return Validation::Failure(Issues::single(
                    Issue::new(
                        IssueCode::TooBig,
                        path.clone(),
                        format!("Value exceeds maximum nesting depth of {}", max),
                    )
                    .with_maximum(max as u64),
                ));
            }
        }

        Validation::Success(value.clone())
    }
}

/// A schema that parses a string as JSON.
///
/// The input must be a string holding a valid JSON text per RFC 8259 —
/// `undefined`, BigInt-style literals such as `42n`, and other JavaScript
/// looseness are rejected. On success the parsed value replaces the string,
/// and an optional piped schema validates it in place.
///
/// # Example
///
/// ```rust
/// use veto::{JsonPath, Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::string_to_json().pipe(Schema::json().max_depth(3));
///
/// let result = schema.validate(&json!(r#"{"a": [1, 2]}"#), &JsonPath::root());
/// assert_eq!(result.into_result().unwrap(), json!({"a": [1, 2]}));
///
/// assert!(schema.validate(&json!("not json"), &JsonPath::root()).is_failure());
/// ```
#[derive(Clone)]
pub struct JsonParseSchema {
    piped: Option<Arc<dyn SchemaLike>>,
}

impl JsonParseSchema {
    pub fn new() -> Self {
        Self { piped: None }
    }

    /// Validates the parsed value against `schema`.
    pub fn pipe<S: SchemaLike + 'static>(mut self, schema: S) -> Self {
        self.piped = Some(Arc::new(schema));
        self
    }
}

impl Default for JsonParseSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for JsonParseSchema {
    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        let raw = match value.as_str() {
            Some(s) => s,
            None => {
                return Validation::Failure(Issues::single(
                    Issue::new(
                        IssueCode::InvalidType,
                        path.clone(),
                        format!("Expected string, received {}", value_type_name(value)),
                    )
                    .with_expected("string")
                    .with_received(value_type_name(value)),
                ));
            }
        };

        let parsed: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(_) => {
                return Validation::Failure(Issues::single(Issue::custom(
                    path.clone(),
                    "Invalid JSON",
                )));
            }
        };

        match &self.piped {
            Some(schema) => schema.validate(&parsed, path),
            None => Validation::Success(parsed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_depth_of_scalars_is_zero() {
        assert_eq!(nesting_depth(&json!(1)), 0);
        assert_eq!(nesting_depth(&json!("x")), 0);
        assert_eq!(nesting_depth(&json!(null)), 0);
    }

    #[test]
    fn test_depth_counts_container_levels() {
        assert_eq!(nesting_depth(&json!({})), 1);
        assert_eq!(nesting_depth(&json!({"a": {"b": 1}})), 2);
        assert_eq!(nesting_depth(&json!({"a": {"b": {"c": 1}}})), 3);
        assert_eq!(nesting_depth(&json!([[1], [[2]]])), 3);
    }

    #[test]
    fn test_json_accepts_any_value_without_bound() {
        let schema = JsonSchema::any();
        for v in [json!(1), json!("x"), json!(null), json!([{"a": [1]}])] {
            assert!(schema.validate(&v, &JsonPath::root()).is_success());
        }
    }

    #[test]
    fn test_depth_bound_is_a_validation_failure() {
        let schema = JsonSchema::any().max_depth(2);
        let errors =
            unwrap_failure(schema.validate(&json!({"a": {"b": {"c": 1}}}), &JsonPath::root()));
        assert_eq!(errors.first().code, IssueCode::TooBig);
        assert_eq!(errors.first().maximum, Some(2u64.into()));
    }

    #[test]
    fn test_json_object_rejects_non_objects() {
        let schema = JsonSchema::object();
        assert!(schema.validate(&json!({"a": 1}), &JsonPath::root()).is_success());

        let errors = unwrap_failure(schema.validate(&json!([1, 2]), &JsonPath::root()));
        assert_eq!(errors.first().code, IssueCode::InvalidType);
    }

    #[test]
    fn test_parse_replaces_string_with_value() {
        let schema = JsonParseSchema::new();
        let result = schema.validate(&json!("[1, 2, 3]"), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_parse_accepts_bare_json_scalars() {
        let schema = JsonParseSchema::new();
        assert_eq!(
            schema
                .validate(&json!("42"), &JsonPath::root())
                .into_result()
                .unwrap(),
            json!(42)
        );
        assert_eq!(
            schema
                .validate(&json!("null"), &JsonPath::root())
                .into_result()
                .unwrap(),
            json!(null)
        );
    }

    #[test]
    fn test_parse_rejects_javascript_looseness() {
        let schema = JsonParseSchema::new();
        for bad in ["undefined", "42n", "{a: 1}", "'single'"] {
            let errors = unwrap_failure(schema.validate(&json!(bad), &JsonPath::root()));
            assert_eq!(errors.first().code, IssueCode::Custom);
            assert_eq!(errors.first().message, "Invalid JSON");
        }
    }

    #[test]
    fn test_parse_requires_string_input() {
        let schema = JsonParseSchema::new();
        let errors = unwrap_failure(schema.validate(&json!(42), &JsonPath::root()));
        assert_eq!(errors.first().code, IssueCode::InvalidType);
    }

    #[test]
    fn test_pipe_validates_parsed_value() {
        let schema = JsonParseSchema::new().pipe(JsonSchema::any().max_depth(1));
        assert!(schema.validate(&json!("[1, 2]"), &JsonPath::root()).is_success());
        assert!(schema.validate(&json!("[[1]]"), &JsonPath::root()).is_failure());
    }
}
