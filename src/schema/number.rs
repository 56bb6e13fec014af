//! Number schema.

use serde_json::{Number, Value};
use stillwater::Validation;

use crate::issue::{Issue, IssueCode, Issues};
use crate::path::JsonPath;

use super::traits::{value_type_name, SchemaLike};

/// A schema for JSON numbers.
///
/// Accepts any JSON number; `min`/`max` bound the value inclusively and
/// violations accumulate alongside each other.
#[derive(Clone)]
pub struct NumberSchema {
    min: Option<f64>,
    max: Option<f64>,
    min_message: Option<String>,
    max_message: Option<String>,
}

impl NumberSchema {
    /// Creates a number schema with no bounds.
    pub fn new() -> Self {
        Self {
            min: None,
            max: None,
            min_message: None,
            max_message: None,
        }
    }

    /// Sets the inclusive lower bound. Non-finite bounds are ignored.
    pub fn min(mut self, min: f64) -> Self {
        if min.is_finite() {
            self.min = Some(min);
        }
        self
    }

    /// Sets the inclusive upper bound. Non-finite bounds are ignored.
    pub fn max(mut self, max: f64) -> Self {
        if max.is_finite() {
            self.max = Some(max);
        }
        self
    }

    /// Custom message for lower-bound violations.
    pub fn min_message(mut self, message: impl Into<String>) -> Self {
        self.min_message = Some(message.into());
        self
    }

    /// Custom message for upper-bound violations.
    pub fn max_message(mut self, message: impl Into<String>) -> Self {
        self.max_message = Some(message.into());
        self
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for NumberSchema {
    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        let n = match value.as_f64() {
            Some(n) => n,
            None => {
                return Validation::Failure(Issues::single(
                    Issue::new(
                        IssueCode::InvalidType,
                        path.clone(),
                        format!("Expected number, received {}", value_type_name(value)),
                    )
                    .with_expected("number")
                    .with_received(value_type_name(value)),
                ));
            }
        };

        let mut issues = Vec::new();
        if let Some(min) = self.min {
            if n < min {
                let message = self
                    .min_message
                    .clone()
                    .unwrap_or_else(|| format!("Number must be greater than or equal to {}", min));
                let mut issue = Issue::new(IssueCode::TooSmall, path.clone(), message);
                if let Some(bound) = Number::from_f64(min) {
                    issue = issue.with_minimum(bound);
                }
                issues.push(issue);
            }
        }
        if let Some(max) = self.max {
            if n > max {
                let message = self
                    .max_message
                    .clone()
                    .unwrap_or_else(|| format!("Number must be less than or equal to {}", max));
                let mut issue = Issue::new(IssueCode::TooBig, path.clone(), message);
                if let Some(bound) = Number::from_f64(max) {
                    issue = issue.with_maximum(bound);
                }
                issues.push(issue);
            }
        }

        if issues.is_empty() {
            Validation::Success(value.clone())
        } else {
            Validation::Failure(Issues::from_vec(issues))
        }
    }
}
