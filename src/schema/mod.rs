//! Schema builders.
//!
//! [`Schema`] is the factory for every primitive: strings trim and require at
//! least one character by default, objects are strict, arrays validate every
//! element and never short-circuit. Each builder returns a plain value;
//! constructing a schema never validates anything.

pub(crate) mod array;
pub(crate) mod combinators;
pub(crate) mod json_value;
pub(crate) mod number;
pub(crate) mod object;
pub(crate) mod scalar;
pub(crate) mod string;
pub(crate) mod traits;
pub(crate) mod union;

use serde_json::Value;

pub use array::ArraySchema;
pub use combinators::and;
pub use json_value::{JsonParseSchema, JsonSchema};
pub use number::NumberSchema;
pub use object::ObjectSchema;
pub use scalar::{BooleanSchema, EnumSchema, LiteralSchema};
pub use string::StringSchema;
pub use traits::SchemaLike;
pub use union::DiscriminatedUnionSchema;

/// Entry point for building schemas.
///
/// # Example
///
/// ```rust
/// use veto::{JsonPath, Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string().min(2))
///     .field("age", Schema::number().min(0.0))
///     .optional("tags", Schema::array(Schema::string()).max(5));
///
/// let result = schema.validate(
///     &json!({"name": "Ada", "age": 36}),
///     &JsonPath::root(),
/// );
/// assert!(result.is_success());
/// ```
pub struct Schema;

impl Schema {
    /// A string schema: trims, then requires length ≥ 1.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// A number schema with no bounds.
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    /// A boolean schema.
    pub fn boolean() -> BooleanSchema {
        BooleanSchema::new()
    }

    /// A schema accepting exactly `literal`.
    pub fn literal(literal: impl Into<Value>) -> LiteralSchema {
        LiteralSchema::new(literal)
    }

    /// An array schema validating each element against `element`.
    pub fn array<S: SchemaLike + 'static>(element: S) -> ArraySchema {
        ArraySchema::new(element)
    }

    /// A strict object shape with no fields yet.
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Any JSON value tree; bound the nesting with
    /// [`max_depth`](JsonSchema::max_depth).
    pub fn json() -> JsonSchema {
        JsonSchema::any()
    }

    /// Any JSON object tree.
    pub fn json_object() -> JsonSchema {
        JsonSchema::object()
    }

    /// Parses a string as JSON; pipe the parsed value onward with
    /// [`pipe`](JsonParseSchema::pipe).
    pub fn string_to_json() -> JsonParseSchema {
        JsonParseSchema::new()
    }

    /// A schema accepting any of `values`, in declaration order.
    pub fn native_enum(values: Vec<Value>) -> EnumSchema {
        EnumSchema::new(values)
    }

    /// A union discriminated by the field `key`; add variants with
    /// [`variant`](DiscriminatedUnionSchema::variant).
    pub fn discriminated_union(key: impl Into<String>) -> DiscriminatedUnionSchema {
        DiscriminatedUnionSchema::new(key)
    }
}
