//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed names and paths.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid identifier '{segment}' in '{input}'")]
    InvalidIdentifier { input: String, segment: String },

    #[error("invalid qualified name: '{0}'")]
    InvalidQualifiedName(String),
}
