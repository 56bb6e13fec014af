//! Array schema.
//!
//! Length bounds and per-element validation run in the same pass: an array
//! that is both too short and contains malformed elements reports the
//! `too_small` issue at its own path and the element issues at their indexed
//! paths together.

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::issue::{Issue, IssueCode, Issues};
use crate::path::JsonPath;

use super::traits::{value_type_name, SchemaLike};

/// A schema for arrays with a single element schema.
///
/// # Example
///
/// ```rust
/// use veto::{JsonPath, Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::array(Schema::string()).min(2);
///
/// assert!(schema.validate(&json!(["a", "b"]), &JsonPath::root()).is_success());
/// assert!(schema.validate(&json!(["a"]), &JsonPath::root()).is_failure());
/// ```
#[derive(Clone)]
pub struct ArraySchema {
    element: Arc<dyn SchemaLike>,
    min: Option<usize>,
    max: Option<usize>,
    min_message: Option<String>,
    max_message: Option<String>,
}

impl ArraySchema {
    /// Creates an array schema validating each element against `element`.
    pub fn new<S: SchemaLike + 'static>(element: S) -> Self {
        Self {
            element: Arc::new(element),
            min: None,
            max: None,
            min_message: None,
            max_message: None,
        }
    }

    /// Requires at least `min` elements.
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Requires at most `max` elements.
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Custom message for minimum-length violations.
    pub fn min_message(mut self, message: impl Into<String>) -> Self {
        self.min_message = Some(message.into());
        self
    }

    /// Custom message for maximum-length violations.
    pub fn max_message(mut self, message: impl Into<String>) -> Self {
        self.max_message = Some(message.into());
        self
    }

    /// The `invalid_type` issue for non-array input.
    pub(crate) fn type_issue(&self, value: &Value, path: &JsonPath) -> Issue {
        Issue::new(
            IssueCode::InvalidType,
            path.clone(),
            format!("Expected array, received {}", value_type_name(value)),
        )
        .with_expected("array")
        .with_received(value_type_name(value))
    }

    /// Length checks plus per-element validation against an array slice.
    ///
    /// Returns all issues and the validated elements (elements that failed
    /// are absent from the output positions; the vec is only used on overall
    /// success, when it is complete).
    pub(crate) fn check(&self, items: &[Value], path: &JsonPath) -> (Vec<Issue>, Vec<Value>) {
        let mut issues = Vec::new();

        if let Some(min) = self.min {
            if items.len() < min {
                let message = self.min_message.clone().unwrap_or_else(|| {
                    format!("Array must contain at least {} element(s)", min)
                });
                issues.push(
                    Issue::new(IssueCode::TooSmall, path.clone(), message)
                        .with_minimum(min as u64),
                );
            }
        }
        if let Some(max) = self.max {
            if items.len() > max {
                let message = self.max_message.clone().unwrap_or_else(|| {
                    format!("Array must contain at most {} element(s)", max)
                });
                issues.push(
                    Issue::new(IssueCode::TooBig, path.clone(), message).with_maximum(max as u64),
                );
            }
        }

        let mut validated = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let item_path = path.push_index(index);
            match self.element.validate(item, &item_path) {
                Validation::Success(v) => validated.push(v),
                Validation::Failure(e) => issues.extend(e),
            }
        }

        (issues, validated)
    }
}

impl SchemaLike for ArraySchema {
    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        let items = match value.as_array() {
            Some(a) => a,
            None => return Validation::Failure(Issues::single(self.type_issue(value, path))),
        };

        let (issues, validated) = self.check(items, path);
        if issues.is_empty() {
            Validation::Success(Value::Array(validated))
        } else {
            Validation::Failure(Issues::from_vec(issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::string::StringSchema;
    use serde_json::json;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_validates_each_element() {
        let schema = ArraySchema::new(StringSchema::new());
        assert!(schema
            .validate(&json!(["a", "b"]), &JsonPath::root())
            .is_success());
    }

    #[test]
    fn test_non_array_is_single_type_issue() {
        let schema = ArraySchema::new(StringSchema::new());
        let errors = unwrap_failure(schema.validate(&json!("nope"), &JsonPath::root()));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().code, IssueCode::InvalidType);
        assert!(errors.first().path.is_root());
    }

    #[test]
    fn test_element_issues_carry_indexed_paths() {
        let schema = ArraySchema::new(StringSchema::new());
        let errors = unwrap_failure(schema.validate(&json!(["ok", 5]), &JsonPath::root()));
        assert_eq!(errors.first().path.to_string(), "[1]");
    }

    #[test]
    fn test_too_small_and_element_issues_together() {
        let schema = ArraySchema::new(StringSchema::new()).min(10);
        let errors = unwrap_failure(schema.validate(&json!(["one", 2, "three"]), &JsonPath::root()));

        assert_eq!(errors.with_code(IssueCode::TooSmall).len(), 1);
        let type_issues = errors.with_code(IssueCode::InvalidType);
        assert_eq!(type_issues.len(), 1);
        assert_eq!(type_issues[0].path.to_string(), "[1]");
    }

    #[test]
    fn test_max_elements() {
        let schema = ArraySchema::new(StringSchema::new()).max(1);
        let errors = unwrap_failure(schema.validate(&json!(["a", "b"]), &JsonPath::root()));
        assert_eq!(errors.first().code, IssueCode::TooBig);
        assert_eq!(errors.first().maximum, Some(1u64.into()));
    }

    #[test]
    fn test_success_output_keeps_element_transforms() {
        let schema = ArraySchema::new(StringSchema::new());
        let result = schema.validate(&json!(["  padded  "]), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), json!(["padded"]));
    }
}
