//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent seed-structure violations detected at
/// initialization. Update operations themselves never fail.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("duplicate node id: {0}")]
    DuplicateId(String),

    #[error("non-finite value for node: {0}")]
    NonFiniteValue(String),
}
