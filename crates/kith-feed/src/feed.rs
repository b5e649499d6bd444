use chrono::{DateTime, Utc};
use kith_types::{MemberId, Post, PostId};
use serde::{Deserialize, Serialize};

/// A reference to one visible post.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedEntry {
    pub post: PostId,
    pub author: MemberId,
}

impl From<&Post> for FeedEntry {
    fn from(post: &Post) -> Self {
        Self {
            post: post.id,
            author: post.author,
        }
    }
}

/// A viewer's materialized feed.
///
/// `entries` is always exactly the output of one rebuild (or empty after a
/// clear). `generation` counts how many times the contents were replaced;
/// `rebuilt_at` is the time of the last rebuild and is not touched by a clear.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub owner: MemberId,
    pub entries: Vec<FeedEntry>,
    pub generation: u64,
    pub rebuilt_at: Option<DateTime<Utc>>,
}

impl Feed {
    /// The empty feed created at account setup.
    pub fn empty(owner: MemberId) -> Self {
        Self {
            owner,
            entries: Vec::new(),
            generation: 0,
            rebuilt_at: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn post_ids(&self) -> Vec<PostId> {
        self.entries.iter().map(|e| e.post).collect()
    }
}
