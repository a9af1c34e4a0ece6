//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// A required login field was blank.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// No user is logged in.
    #[error("not logged in")]
    NotAuthenticated,

    /// Unknown role name.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// Cache error.
    #[error("cache error: {0}")]
    Cache(#[from] upenergy_cache::CacheError),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials(_) | AuthError::NotAuthenticated
        )
    }
}
