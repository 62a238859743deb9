//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent contract violations of tree operations.
///
/// Most anomalous inputs (duplicate insert, deleting or finding an absent key)
/// are silent no-ops and never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
