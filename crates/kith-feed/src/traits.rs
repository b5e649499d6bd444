//! The [`FeedStore`] trait defining feed persistence.

use kith_types::MemberId;

use crate::error::Result;
use crate::feed::{Feed, FeedEntry};

/// Storage backend for per-viewer feeds.
///
/// Implementations must make [`commit`](FeedStore::commit) atomic: a reader
/// sees either the previous contents or the committed ones, never a mix.
pub trait FeedStore: Send + Sync {
    /// Create an empty feed for `owner`. Fails with `AlreadyExists` if one
    /// is already there.
    fn create(&self, owner: MemberId) -> Result<Feed>;

    /// Read `owner`'s feed. Fails with `NotFound` if none exists.
    fn get(&self, owner: &MemberId) -> Result<Feed>;

    /// Whether `owner` has a feed.
    fn exists(&self, owner: &MemberId) -> Result<bool>;

    /// Empty `owner`'s feed and bump its generation, leaving `rebuilt_at`
    /// as it was. Fails with `NotFound` if none exists.
    fn clear(&self, owner: &MemberId) -> Result<Feed>;

    /// Replace the contents of `owner`'s feed with `entries` in one step and
    /// bump its generation. Fails with `NotFound` if none exists.
    fn commit(&self, owner: &MemberId, entries: Vec<FeedEntry>) -> Result<Feed>;

    /// Drop `owner`'s feed. Returns `true` if one existed.
    fn delete(&self, owner: &MemberId) -> Result<bool>;
}
