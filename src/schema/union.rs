//! Discriminated unions.
//!
//! Variant selection is tag-directed: the value at the discriminator key
//! picks exactly one variant, which then validates the whole object strictly.
//! A matched variant therefore reports unrecognized keys and its own missing
//! required fields together, like any strict shape.

use serde_json::Value;
use stillwater::Validation;

use crate::issue::{Issue, IssueCode, Issues};
use crate::path::JsonPath;

use super::object::ObjectSchema;
use super::scalar::LiteralSchema;
use super::traits::{value_type_name, SchemaLike};

/// A schema selecting one of several object variants by a discriminator
/// field.
///
/// Each variant is registered with its tag value; the variant shape gets the
/// discriminator injected as a literal field, so variants only declare their
/// own payload fields. When no tag matches, the failure is a single
/// `invalid_union` issue at the discriminator's path carrying the
/// discriminator name and the note `"No matching discriminator"`.
///
/// # Example
///
/// ```rust
/// use veto::{JsonPath, Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::discriminated_union("mode")
///     .variant("STRING", Schema::object().field("stringField", Schema::string()))
///     .variant("NUMBER", Schema::object().field("numberField", Schema::number()));
///
/// let result = schema.validate(
///     &json!({"mode": "NUMBER", "numberField": 123}),
///     &JsonPath::root(),
/// );
/// assert!(result.is_success());
/// ```
pub struct DiscriminatedUnionSchema {
    discriminator: String,
    variants: Vec<(Value, ObjectSchema)>,
}

impl DiscriminatedUnionSchema {
    /// Creates a union discriminated by the field `discriminator`.
    pub fn new(discriminator: impl Into<String>) -> Self {
        Self {
            discriminator: discriminator.into(),
            variants: Vec::new(),
        }
    }

    /// Registers a variant under `tag`.
    ///
    /// The first variant registered for a tag wins; `shape` should declare
    /// the variant's payload fields but not the discriminator itself.
    pub fn variant(mut self, tag: impl Into<Value>, shape: ObjectSchema) -> Self {
        let tag = tag.into();
        let shape = ObjectSchema::new()
            .field(&self.discriminator, LiteralSchema::new(tag.clone()))
            .merge(shape);
        self.variants.push((tag, shape));
        self
    }
}

impl SchemaLike for DiscriminatedUnionSchema {
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

        let tag = obj.get(&self.discriminator);
        let selected = tag.and_then(|tag| {
            self.variants
                .iter()
                .find(|(candidate, _)| candidate == tag)
                .map(|(_, shape)| shape)
        });

        match selected {
            Some(shape) => shape.validate(value, path),
            None => Validation::Failure(Issues::single(
                Issue::new(
                    IssueCode::InvalidUnion,
                    path.push_field(&self.discriminator),
                    "Invalid discriminator value",
                )
                .with_discriminator(&self.discriminator)
                .with_note("No matching discriminator"),
            )),
        }
    }
}
