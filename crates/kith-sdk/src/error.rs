use kith_types::{ErrorKind, GroupId, MemberId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KithError {
    #[error("membership error: {0}")]
    Set(#[from] kith_sets::SetError),

    #[error("recommendation error: {0}")]
    Recommend(#[from] kith_recommend::RecommendError),

    #[error("feed error: {0}")]
    Feed(#[from] kith_feed::FeedError),

    #[error("{member} is not the owner of group {group}")]
    NotGroupOwner { member: MemberId, group: GroupId },

    #[error("friend graph error: {0}")]
    Friends(String),
}

impl KithError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Set(e) => e.kind(),
            Self::Recommend(e) => e.kind(),
            Self::Feed(e) => e.kind(),
            Self::NotGroupOwner { .. } => ErrorKind::NotAllowed,
            Self::Friends(_) => ErrorKind::Internal,
        }
    }
}

pub type KithResult<T> = Result<T, KithError>;
