//! Error types for recommendation operations.

use kith_sets::SetError;
use kith_types::{ErrorKind, MemberId};
use thiserror::Error;

/// Errors that can occur while computing or paging recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// No recommendations have been computed for this owner.
    #[error("recommendations for {owner} do not exist")]
    NotFound { owner: MemberId },

    /// The owner's candidate list has been read to the end.
    #[error("no more recommendations for {owner} (cursor {cursor}, {len} candidates)")]
    Exhausted {
        owner: MemberId,
        cursor: usize,
        len: usize,
    },

    /// Page sizes must be at least one.
    #[error("page size must be positive")]
    InvalidPageSize,

    /// Concurrent pagination kept winning the cursor race.
    #[error("cursor update for {owner} kept conflicting after {attempts} attempts")]
    CursorContention { owner: MemberId, attempts: usize },

    /// Internal state broke an invariant. Should be unreachable.
    #[error("recommendation invariant violated: {0}")]
    InvariantViolation(String),

    /// A membership set lookup failed.
    #[error("membership error: {0}")]
    Set(#[from] SetError),

    /// The storage backend failed.
    #[error("recommendation storage error: {0}")]
    Storage(String),
}

impl RecommendError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Exhausted { .. } => ErrorKind::Exhausted,
            Self::InvalidPageSize => ErrorKind::InvalidInput,
            Self::CursorContention { .. } => ErrorKind::Conflict,
            Self::InvariantViolation(_) | Self::Storage(_) => ErrorKind::Internal,
            Self::Set(e) => e.kind(),
        }
    }
}

/// Convenience type alias for recommendation operations.
pub type Result<T> = std::result::Result<T, RecommendError>;
