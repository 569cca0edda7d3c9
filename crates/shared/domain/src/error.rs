//! Domain-level errors.
//!
//! These errors describe structural problems with directory names and
//! records. They are independent of the directory protocol; the backend
//! flattens them into coarse result codes.

use thiserror::Error;

/// Domain-specific errors for directory naming and record rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Distinguished name is not under the configured base
    #[error("{dn} is not under base {base}")]
    OutsideBase { dn: String, base: String },

    /// Distinguished name has the wrong number of relative components
    #[error("{dn} should have one or two components (has {count})")]
    ComponentCount { dn: String, count: usize },

    /// Validation failed for a record field
    #[error("Validation error: {0}")]
    Validation(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
