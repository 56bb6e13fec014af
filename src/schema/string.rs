//! String schema: trim first, then validate.
//!
//! Strings are trimmed before any constraint runs, and the trimmed string is
//! what successful validation returns. A whitespace-only input therefore
//! trims to `""` and fails the default minimum length of 1.

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::VetoError;
use crate::issue::{Issue, IssueCode, Issues};
use crate::path::JsonPath;

use super::traits::{value_type_name, SchemaLike};

/// A schema for string values.
///
/// Defaults are opinionated: leading/trailing whitespace is stripped before
/// length and pattern checks, and the minimum length is 1, so `""` and
/// `"   "` are both rejected with `too_small`. Constraint violations
/// accumulate; a short string that also misses the pattern reports both.
///
/// # Example
///
/// ```rust
/// use veto::{JsonPath, Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::string().min(3);
///
/// // "  ab  " trims to "ab" (length 2): too_small.
/// let result = schema.validate(&json!("  ab  "), &JsonPath::root());
/// assert!(result.is_failure());
///
/// // "  abc  " trims to "abc": succeeds with the trimmed value.
/// let result = schema.validate(&json!("  abc  "), &JsonPath::root());
/// assert_eq!(result.into_result().unwrap(), json!("abc"));
/// ```
#[derive(Clone)]
pub struct StringSchema {
    min: usize,
    max: Option<usize>,
    pattern: Option<(Regex, String)>,
    min_message: Option<String>,
    max_message: Option<String>,
    pattern_message: Option<String>,
}

impl StringSchema {
    /// Creates a string schema with the default minimum length of 1.
    pub fn new() -> Self {
        Self {
            min: 1,
            max: None,
            pattern: None,
            min_message: None,
            max_message: None,
            pattern_message: None,
        }
    }

    /// Sets the minimum length (in characters, after trimming).
    ///
    /// `min(0)` allows the empty string.
    pub fn min(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    /// Sets the maximum length (in characters, after trimming).
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Requires the trimmed string to match `pattern`.
    ///
    /// An invalid pattern is a schema-construction error, reported
    /// immediately rather than at validate time.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, VetoError> {
        let regex = Regex::new(pattern)?;
        self.pattern = Some((regex, pattern.to_string()));
        Ok(self)
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

    /// Custom message for pattern violations.
    pub fn pattern_message(mut self, message: impl Into<String>) -> Self {
        self.pattern_message = Some(message.into());
        self
    }

    /// Runs the length/pattern constraints against an already-trimmed string.
    ///
    /// Shared between plain validation and the refinement wrapper, which
    /// needs structural issues and rule issues side by side.
    pub(crate) fn check(&self, trimmed: &str, path: &JsonPath) -> Vec<Issue> {
        let mut issues = Vec::new();
        let len = trimmed.chars().count();

        if len < self.min {
            let message = self.min_message.clone().unwrap_or_else(|| {
                format!("String must contain at least {} character(s)", self.min)
            });
            issues.push(
                Issue::new(IssueCode::TooSmall, path.clone(), message).with_minimum(self.min as u64),
            );
        }
        if let Some(max) = self.max {
            if len > max {
                let message = self
                    .max_message
                    .clone()
                    .unwrap_or_else(|| format!("String must contain at most {} character(s)", max));
                issues.push(
                    Issue::new(IssueCode::TooBig, path.clone(), message).with_maximum(max as u64),
                );
            }
        }
        if let Some((regex, source)) = &self.pattern {
            if !regex.is_match(trimmed) {
                let message = self
                    .pattern_message
                    .clone()
                    .unwrap_or_else(|| format!("String must match pattern '{}'", source));
                issues.push(
                    Issue::new(IssueCode::InvalidValue, path.clone(), message)
                        .with_expected(format!("string matching '{}'", source)),
                );
            }
        }
        issues
    }

    /// The `invalid_type` issue for non-string input.
    pub(crate) fn type_issue(&self, value: &Value, path: &JsonPath) -> Issue {
        Issue::new(
            IssueCode::InvalidType,
            path.clone(),
            format!("Expected string, received {}", value_type_name(value)),
        )
        .with_expected("string")
        .with_received(value_type_name(value))
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for StringSchema {
    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        let raw = match value.as_str() {
            Some(s) => s,
            None => return Validation::Failure(Issues::single(self.type_issue(value, path))),
        };

        let trimmed = raw.trim();
        let issues = self.check(trimmed, path);
        if issues.is_empty() {
            Validation::Success(Value::String(trimmed.to_string()))
        } else {
            Validation::Failure(Issues::from_vec(issues))
        }
    }
}
