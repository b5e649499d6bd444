//! Collaborator interfaces the aggregator reads from, plus in-memory
//! implementations for tests and embedding.
//!
//! Post storage and label (audience group) management belong to other
//! services. The aggregator only needs "posts by author" and "members of
//! group", and treats both as fallible lookups whose errors it passes on.

use std::collections::HashMap;
use std::sync::RwLock;

use kith_types::{GroupId, MemberId, Post};

use crate::error::{FeedError, Result};

/// Read access to the shared post pool.
pub trait PostSource: Send + Sync {
    /// Every post written by `author`, in storage order.
    fn posts_by_author(&self, author: &MemberId) -> Result<Vec<Post>>;
}

/// Read access to audience groups.
pub trait AudienceLookup: Send + Sync {
    /// Members of `group`. Fails with `GroupNotFound` if it does not exist.
    fn members_of(&self, group: &GroupId) -> Result<Vec<MemberId>>;

    /// The member who created `group`. Fails with `GroupNotFound` if it does
    /// not exist.
    fn owner_of(&self, group: &GroupId) -> Result<MemberId>;
}

/// [`PostSource`] backed by a `HashMap` of per-author post lists.
#[derive(Debug, Default)]
pub struct InMemoryPostSource {
    posts: RwLock<HashMap<MemberId, Vec<Post>>>,
}

impl InMemoryPostSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `post` to its author's list.
    pub fn publish(&self, post: Post) -> Result<()> {
        let mut posts = self
            .posts
            .write()
            .map_err(|e| FeedError::collaborator("post source", format!("lock poisoned: {e}")))?;
        posts.entry(post.author).or_default().push(post);
        Ok(())
    }
}

impl PostSource for InMemoryPostSource {
    fn posts_by_author(&self, author: &MemberId) -> Result<Vec<Post>> {
        let posts = self
            .posts
            .read()
            .map_err(|e| FeedError::collaborator("post source", format!("lock poisoned: {e}")))?;
        Ok(posts.get(author).cloned().unwrap_or_default())
    }
}

#[derive(Clone, Debug)]
struct Group {
    owner: MemberId,
    members: Vec<MemberId>,
}

/// [`AudienceLookup`] backed by a `HashMap` of groups.
#[derive(Debug, Default)]
pub struct InMemoryAudience {
    groups: RwLock<HashMap<GroupId, Group>>,
}

impl InMemoryAudience {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) `group`, owned by `owner`.
    pub fn define(&self, group: GroupId, owner: MemberId, members: Vec<MemberId>) -> Result<()> {
        let mut groups = self
            .groups
            .write()
            .map_err(|e| FeedError::collaborator("audience lookup", format!("lock poisoned: {e}")))?;
        groups.insert(group, Group { owner, members });
        Ok(())
    }

    fn group(&self, group: &GroupId) -> Result<Group> {
        let groups = self
            .groups
            .read()
            .map_err(|e| FeedError::collaborator("audience lookup", format!("lock poisoned: {e}")))?;
        groups
            .get(group)
            .cloned()
            .ok_or(FeedError::GroupNotFound { group: *group })
    }
}

impl AudienceLookup for InMemoryAudience {
    fn members_of(&self, group: &GroupId) -> Result<Vec<MemberId>> {
        Ok(self.group(group)?.members)
    }

    fn owner_of(&self, group: &GroupId) -> Result<MemberId> {
        Ok(self.group(group)?.owner)
    }
}
