//! In-memory feed store for testing and ephemeral use.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use kith_types::MemberId;

use crate::error::{FeedError, Result};
use crate::feed::{Feed, FeedEntry};
use crate::traits::FeedStore;

/// An in-memory implementation of [`FeedStore`].
///
/// Feeds live in a `HashMap` behind a `RwLock`; `commit` swaps the entry
/// list under the write lock, which is what makes it atomic to readers.
#[derive(Debug, Default)]
pub struct InMemoryFeedStore {
    feeds: RwLock<HashMap<MemberId, Feed>>,
}

impl InMemoryFeedStore {
    /// Create a new empty feed store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<MemberId, Feed>>> {
        self.feeds
            .read()
            .map_err(|e| FeedError::Storage(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<MemberId, Feed>>> {
        self.feeds
            .write()
            .map_err(|e| FeedError::Storage(format!("lock poisoned: {e}")))
    }

    // Only a commit is a rebuild; a clear keeps the last `rebuilt_at`.
    fn replace_entries(
        &self,
        owner: &MemberId,
        entries: Vec<FeedEntry>,
        rebuilt: bool,
    ) -> Result<Feed> {
        let mut feeds = self.write()?;
        let feed = feeds
            .get_mut(owner)
            .ok_or(FeedError::NotFound { owner: *owner })?;
        feed.entries = entries;
        feed.generation += 1;
        if rebuilt {
            feed.rebuilt_at = Some(Utc::now());
        }
        Ok(feed.clone())
    }
}

impl FeedStore for InMemoryFeedStore {
    fn create(&self, owner: MemberId) -> Result<Feed> {
        let mut feeds = self.write()?;
        if feeds.contains_key(&owner) {
            return Err(FeedError::AlreadyExists { owner });
        }
        let feed = Feed::empty(owner);
        feeds.insert(owner, feed.clone());
        Ok(feed)
    }

    fn get(&self, owner: &MemberId) -> Result<Feed> {
        self.read()?
            .get(owner)
            .cloned()
            .ok_or(FeedError::NotFound { owner: *owner })
    }

    fn exists(&self, owner: &MemberId) -> Result<bool> {
        Ok(self.read()?.contains_key(owner))
    }

    fn clear(&self, owner: &MemberId) -> Result<Feed> {
        self.replace_entries(owner, Vec::new(), false)
    }

    fn commit(&self, owner: &MemberId, entries: Vec<FeedEntry>) -> Result<Feed> {
        self.replace_entries(owner, entries, true)
    }

    fn delete(&self, owner: &MemberId) -> Result<bool> {
        Ok(self.write()?.remove(owner).is_some())
    }
}
