//! Adapter from [`VetoResult`] to the `{ values, errors }` resolver shape
//! form-binding layers expect.
//!
//! Deliberately thin: it maps the result object and nothing else. On success
//! the resolver output carries the validated values and an empty error
//! object; on failure, empty values and the serialized error tree.

use serde::Serialize;
use serde_json::{json, Value};

use crate::veto::{Veto, VetoResult};

/// The resolver contract: always both fields, one of them trivial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolverOutput {
    /// Validated values on success, `{}` on failure.
    pub values: Value,
    /// `{}` on success, the serialized error tree on failure.
    pub errors: Value,
}

impl From<VetoResult> for ResolverOutput {
    fn from(result: VetoResult) -> Self {
        match (result.data, result.errors) {
            (Some(data), _) => ResolverOutput {
                values: data,
                errors: json!({}),
            },
            (None, errors) => ResolverOutput {
                values: json!({}),
                errors: errors
                    .and_then(|tree| serde_json::to_value(tree).ok())
                    .unwrap_or_else(|| json!({})),
            },
        }
    }
}

/// Runs `instance` synchronously and maps the result to the resolver shape.
pub fn resolve<E>(instance: &Veto<E>, values: &Value) -> ResolverOutput {
    instance.validate(values).into()
}

/// Runs `instance` with its async rules and maps the result to the resolver
/// shape.
pub fn resolve_async<E: Sync>(instance: &Veto<E>, values: &Value, env: &E) -> ResolverOutput {
    instance.validate_async(values, env).into()
}
