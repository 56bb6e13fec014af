//! Boolean, literal, and enumeration schemas.

use serde_json::Value;
use stillwater::Validation;

use crate::issue::{Issue, IssueCode, Issues};
use crate::path::JsonPath;

use super::traits::{value_type_name, SchemaLike};

/// A schema accepting `true` or `false`.
#[derive(Clone, Default)]
pub struct BooleanSchema;

impl BooleanSchema {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaLike for BooleanSchema {
    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        if value.is_boolean() {
            Validation::Success(value.clone())
        } else {
            Validation::Failure(Issues::single(
                Issue::new(
                    IssueCode::InvalidType,
                    path.clone(),
                    format!("Expected boolean, received {}", value_type_name(value)),
                )
                .with_expected("boolean")
                .with_received(value_type_name(value)),
            ))
        }
    }
}

/// A schema accepting exactly one value.
///
/// Mismatches report `invalid_value` with the literal as the only allowed
/// value.
#[derive(Clone)]
pub struct LiteralSchema {
    literal: Value,
}

impl LiteralSchema {
    pub fn new(literal: impl Into<Value>) -> Self {
        Self {
            literal: literal.into(),
        }
    }

    /// The value this schema accepts.
    pub fn literal(&self) -> &Value {
        &self.literal
    }
}

impl SchemaLike for LiteralSchema {
    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        if value == &self.literal {
            Validation::Success(value.clone())
        } else {
            Validation::Failure(Issues::single(
                Issue::new(
                    IssueCode::InvalidValue,
                    path.clone(),
                    format!("Invalid literal value, expected {}", self.literal),
                )
                .with_values(vec![self.literal.clone()]),
            ))
        }
    }
}

/// A schema accepting any value from a fixed set.
///
/// Mirrors an enum defined elsewhere: the allowed values keep their
/// declaration order and may mix strings and numbers. Rejections report
/// `invalid_value` listing every allowed value.
///
/// # Example
///
/// ```rust
/// use veto::{JsonPath, Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::native_enum(vec![json!("ACTIVE"), json!("INACTIVE"), json!(0)]);
///
/// assert!(schema.validate(&json!("ACTIVE"), &JsonPath::root()).is_success());
/// assert!(schema.validate(&json!("UNKNOWN"), &JsonPath::root()).is_failure());
/// ```
#[derive(Clone)]
pub struct EnumSchema {
    values: Vec<Value>,
}

impl EnumSchema {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }
}

impl SchemaLike for EnumSchema {
    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        if self.values.iter().any(|allowed| allowed == value) {
            Validation::Success(value.clone())
        } else {
            let rendered: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
            Validation::Failure(Issues::single(
                Issue::new(
                    IssueCode::InvalidValue,
                    path.clone(),
                    format!("Invalid value. Expected one of: {}", rendered.join(", ")),
                )
                .with_values(self.values.clone()),
            ))
        }
    }
}
