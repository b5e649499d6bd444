//! Error types for membership set operations.

use kith_types::ErrorKind;
use thiserror::Error;

/// Errors that can occur during membership set operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetError {
    /// No set has been created under this name.
    #[error("membership set not found: {name}")]
    NotFound { name: String },

    /// Set names must contain at least one non-whitespace character.
    #[error("invalid membership set name: {name:?}")]
    InvalidName { name: String },

    /// The storage backend failed (lock poisoning, I/O, ...).
    #[error("membership storage error: {0}")]
    Storage(String),
}

impl SetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidName { .. } => ErrorKind::InvalidInput,
            Self::Storage(_) => ErrorKind::Internal,
        }
    }
}

/// Convenience type alias for membership set operations.
pub type Result<T> = std::result::Result<T, SetError>;
