//! Error types for feed operations.

use kith_types::{ErrorKind, GroupId, MemberId};
use thiserror::Error;

/// Errors that can occur while building or reading feeds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The owner has no feed (account setup never created one).
    #[error("member {owner} does not have a feed")]
    NotFound { owner: MemberId },

    /// A feed already exists for this owner.
    #[error("member {owner} already has a feed")]
    AlreadyExists { owner: MemberId },

    /// An audience group referenced by a post or request does not exist.
    #[error("group {group} does not exist")]
    GroupNotFound { group: GroupId },

    /// A collaborator (post source, audience lookup) failed.
    #[error("{collaborator} failed: {message}")]
    Collaborator {
        collaborator: &'static str,
        message: String,
    },

    /// The storage backend failed.
    #[error("feed storage error: {0}")]
    Storage(String),
}

impl FeedError {
    pub fn collaborator(collaborator: &'static str, message: impl Into<String>) -> Self {
        Self::Collaborator {
            collaborator,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::GroupNotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::Conflict,
            Self::Collaborator { .. } | Self::Storage(_) => ErrorKind::Internal,
        }
    }
}

/// Convenience type alias for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
