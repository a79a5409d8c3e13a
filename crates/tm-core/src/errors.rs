//! Cross-cutting error types for taskmaster.
//!
//! Domain-specific errors (`DatabaseError`, `StoreError`, `AuthError`) live in
//! their respective crates. All of them converge into `anyhow` in `tm-cli`
//! and into `ApiError` in `tm-server`.

use thiserror::Error;

/// Errors that can be raised by any taskmaster crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("{entity_type} {id} not found")]
    NotFound { entity_type: String, id: i64 },

    /// Data failed validation (length, range, date constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a `NotFound` error.
    pub fn not_found(entity_type: &str, id: i64) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id,
        }
    }
}
