//! Runtime schema extension.
//!
//! Client-side validation often arrives after the base schema exists: a
//! server announces a uniqueness constraint, a feature flag adds a field
//! check, and both may disappear again. [`ExtensionRegistry`] holds those
//! fragments keyed by an identifier and recomputes the combined schema with
//! [`and`](crate::and) whenever asked — an explicit map plus a pure
//! recomputation step, no implicit reactivity.

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::VetoError;
use crate::schema::ObjectSchema;
use crate::veto::{veto, VetoResult};

/// A thread-safe registry of named schema fragments over a base shape.
///
/// Multiple threads may validate concurrently; insertions and removals are
/// serialized by the write lock. `compile` folds the base with every
/// fragment in insertion order, so recomputation is deterministic.
///
/// # Example
///
/// ```rust
/// use veto::{ExtensionRegistry, Schema};
/// use serde_json::json;
///
/// let registry = ExtensionRegistry::new(
///     Schema::object().field("username", Schema::string().min(2)),
/// );
///
/// // Base schema alone accepts this.
/// assert!(registry.validate(&json!({"username": "abcdefghij"})).success);
///
/// // A server-driven fragment tightens the field.
/// registry.insert(
///     "username-length",
///     Schema::object().field("username", Schema::string().max(8)),
/// );
/// assert!(!registry.validate(&json!({"username": "abcdefghij"})).success);
///
/// // Removing the fragment restores the base behavior.
/// registry.remove("username-length").unwrap();
/// assert!(registry.validate(&json!({"username": "abcdefghij"})).success);
/// ```
pub struct ExtensionRegistry {
    base: ObjectSchema,
    extensions: RwLock<IndexMap<String, ObjectSchema>>,
}

impl ExtensionRegistry {
    /// Creates a registry over `base` with no extensions.
    pub fn new(base: ObjectSchema) -> Self {
        Self {
            base,
            extensions: RwLock::new(IndexMap::new()),
        }
    }

    /// Registers a fragment under `key`, replacing any previous fragment
    /// with the same key.
    ///
    /// Replacement is deliberate: re-registering a key is how refreshed
    /// server-driven rules supersede stale ones.
    pub fn insert(&self, key: impl Into<String>, fragment: ObjectSchema) {
        self.extensions.write().insert(key.into(), fragment);
    }

    /// Removes the fragment under `key`.
    pub fn remove(&self, key: &str) -> Result<(), VetoError> {
        match self.extensions.write().shift_remove(key) {
            Some(_) => Ok(()),
            None => Err(VetoError::UnknownExtension(key.to_string())),
        }
    }

    /// True if a fragment is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.extensions.read().contains_key(key)
    }

    /// Number of registered fragments.
    pub fn len(&self) -> usize {
        self.extensions.read().len()
    }

    /// True if no fragments are registered.
    pub fn is_empty(&self) -> bool {
        self.extensions.read().is_empty()
    }

    /// The combined shape: base merged with every fragment in insertion
    /// order.
    pub fn compile(&self) -> ObjectSchema {
        let extensions = self.extensions.read();
        extensions
            .values()
            .fold(self.base.clone(), |shape, fragment| {
                shape.merge(fragment.clone())
            })
    }

    /// Validates `values` against the current combined shape.
    pub fn validate(&self, values: &Value) -> VetoResult {
        veto(self.compile()).validate(values)
    }
}
