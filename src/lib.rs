//! # veto
//!
//! Schema validation that accumulates every error into a path-addressed
//! error tree.
//!
//! Rather than stopping at the first failure, validation collects all issues
//! — structural type errors, constraint violations, refinement-rule findings
//! — and nests them into a tree mirroring the shape of the value that was
//! validated, ready for field-level consumers to look up by key.
//!
//! ## Core types
//!
//! - [`Schema`]: factory for composable, immutable schema values
//! - [`Issue`] / [`Issues`]: one structured failure / the non-empty bundle
//! - [`ErrorTree`]: nesting of issues addressed by their paths
//! - [`Veto`]: a compiled validator exposing `validate` / `validate_async`
//! - [`VetoResult`]: `{ success, data, errors }` with exactly one of
//!   `data`/`errors` set
//!
//! ## Example
//!
//! ```rust
//! use veto::{veto, Schema};
//! use serde_json::json;
//!
//! let instance = veto(
//!     Schema::object()
//!         .field("username", Schema::string().min(3))
//!         .field("tags", Schema::array(Schema::string()).max(5)),
//! );
//!
//! let result = instance.validate(&json!({
//!     "username": "ada",
//!     "tags": ["compute", "engines"],
//! }));
//! assert!(result.success);
//!
//! let result = instance.validate(&json!({"username": "a", "tags": ["x", 2]}));
//! let errors = result.errors.unwrap();
//! // Scalar field: bare issue array. Array field: _errors plus children.
//! assert_eq!(errors.get("username").unwrap().direct()[0].code.as_str(), "too_small");
//! assert_eq!(errors.get("tags").unwrap().get("1").unwrap().direct()[0].code.as_str(), "invalid_type");
//! ```

pub mod error;
pub mod issue;
pub mod path;
pub mod refine;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod tree;
pub(crate) mod veto;

pub use error::VetoError;
pub use issue::{Issue, IssueCode, Issues};
pub use path::{JsonPath, PathSegment};
pub use refine::{
    refine_array, refine_object, refine_string, ArrayRules, Blacklist, NoConsecutive, ObjectRules,
    RefineCtx, RefinedArray, RefinedString, StringRules, Unique,
};
pub use registry::ExtensionRegistry;
pub use resolver::{resolve, resolve_async, ResolverOutput};
pub use schema::{
    and, ArraySchema, BooleanSchema, DiscriminatedUnionSchema, EnumSchema, JsonParseSchema,
    JsonSchema, LiteralSchema, NumberSchema, ObjectSchema, Schema, SchemaLike, StringSchema,
};
pub use tree::{format_issues, ErrorNode, ErrorTree};
pub use veto::{veto, AsyncRule, RuleError, Veto, VetoResult};

/// Type alias for internal validation results over accumulated issues.
pub type Validated<T> = stillwater::Validation<T, Issues>;
