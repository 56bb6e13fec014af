//! Programmer-error types.
//!
//! Bad input data is never an `Err` — it accumulates as issues in the error
//! tree. `VetoError` covers mistakes in schema definition and registry use,
//! which surface at construction time.

/// Errors raised while building schemas or managing the extension registry.
#[derive(Debug, thiserror::Error)]
pub enum VetoError {
    /// A string pattern failed to compile.
    #[error("invalid string pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Removal of an extension key that was never registered.
    #[error("no extension registered under '{0}'")]
    UnknownExtension(String),
}
