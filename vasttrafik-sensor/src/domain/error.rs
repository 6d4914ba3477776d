//! Domain error types.
//!
//! These errors represent validation failures when building domain values
//! from provider data. They are distinct from API/IO errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A journey arrived without any legs
    #[error("journey must have at least one leg")]
    EmptyJourney,

    /// A required provider field was absent
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
