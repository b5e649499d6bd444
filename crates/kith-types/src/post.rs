use serde::{Deserialize, Serialize};

use crate::ids::{GroupId, MemberId, PostId};

/// The fields of an externally stored post that feed aggregation reads.
///
/// Content, prompts, and styling stay with the post collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author: MemberId,
    /// When set, only members of this group may see the post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<GroupId>,
}

impl Post {
    /// A post visible to every viewer that follows the author.
    pub fn public(id: PostId, author: MemberId) -> Self {
        Self {
            id,
            author,
            audience: None,
        }
    }

    /// A post restricted to the members of `audience`.
    pub fn restricted(id: PostId, author: MemberId, audience: GroupId) -> Self {
        Self {
            id,
            author,
            audience: Some(audience),
        }
    }

    pub fn is_restricted(&self) -> bool {
        self.audience.is_some()
    }
}
