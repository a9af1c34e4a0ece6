//! Commerce error types.

use thiserror::Error;
use upenergy_cache::CacheError;

/// Errors that can occur in marketplace operations.
///
/// Cart mutations never fail; these surface from explicit decoding and
/// from parsing user-supplied catalog options.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Serialization error (e.g. a malformed cart snapshot).
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Persistence error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Unknown sort option.
    #[error("Unknown sort option: {0}")]
    InvalidSortOption(String),

    /// Unknown status filter.
    #[error("Unknown status filter: {0}")]
    InvalidStatusFilter(String),

    /// Unknown credit type.
    #[error("Unknown credit type: {0}")]
    InvalidCreditType(String),
}

impl From<CacheError> for CommerceError {
    fn from(e: CacheError) -> Self {
        match e {
            CacheError::SerializeError(e) => CommerceError::SerializationError(e.to_string()),
            other => CommerceError::CacheError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
