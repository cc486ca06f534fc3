//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only deterministic failures live here (bad input, missing records).
/// Storage faults are an infrastructure concern and are modelled in `hope-infra`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A criterion or field failed validation (e.g. an unparseable date).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (parse failure or non-positive).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The requested record does not exist or is not visible.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
