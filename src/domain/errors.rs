//! Domain errors. Used by ports, use cases and adapters.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

/// Field-level validation failures. Raised before any field is assigned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Name must be at least 2 characters long")]
    NameTooShort,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid status '{0}'. Must be one of: pending, in_progress, completed")]
    InvalidStatus(String),

    #[error("Invalid date format '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A stored record could not be turned back into an entity. Fails the whole load.
    #[error("Malformed {kind} record at index {index}: {reason}")]
    MalformedRecord {
        kind: &'static str,
        index: usize,
        reason: String,
    },

    /// The id counter reached its ceiling; no further entity of this kind can be created.
    #[error("No {0} ids left")]
    IdsExhausted(&'static str),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),
}
