use std::collections::HashMap;
use std::sync::Arc;

use kith_sets::algebra::contains;
use kith_types::{GroupId, MemberId, Post};
use tracing::{debug, info, warn};

use crate::error::{FeedError, Result};
use crate::feed::{Feed, FeedEntry};
use crate::source::{AudienceLookup, PostSource};
use crate::traits::FeedStore;

/// Rebuilds per-viewer feeds from a source population's posts.
///
/// A rebuild stages the full new entry list in memory and then commits it to
/// the [`FeedStore`] in one call, so the clear and the repopulation land
/// together. If any collaborator fails mid-way nothing is committed and the
/// previous generation stays visible.
pub struct FeedAggregator {
    store: Arc<dyn FeedStore>,
    posts: Arc<dyn PostSource>,
    audience: Arc<dyn AudienceLookup>,
}

impl FeedAggregator {
    pub fn new(
        store: Arc<dyn FeedStore>,
        posts: Arc<dyn PostSource>,
        audience: Arc<dyn AudienceLookup>,
    ) -> Self {
        Self {
            store,
            posts,
            audience,
        }
    }

    /// Create the empty feed for a newly registered member.
    pub fn create(&self, owner: MemberId) -> Result<Feed> {
        self.store.create(owner)
    }

    /// Rebuild `owner`'s feed from the posts of `population`.
    ///
    /// For each population member in order: their posts without an audience
    /// go in first (in fetch order), followed by their audience-restricted
    /// posts whose audience includes `owner`. Restricted posts the owner may
    /// not see are skipped.
    pub fn rebuild(&self, owner: &MemberId, population: &[MemberId]) -> Result<Feed> {
        if !self.store.exists(owner)? {
            return Err(FeedError::NotFound { owner: *owner });
        }

        let mut staged: Vec<FeedEntry> = Vec::new();
        let mut visibility: HashMap<GroupId, bool> = HashMap::new();
        let mut hidden = 0usize;

        for member in population {
            let posts = self.posts.posts_by_author(member).map_err(|e| {
                warn!(owner = %owner, author = %member, error = %e, "post fetch failed");
                e
            })?;
            let (restricted, unrestricted): (Vec<&Post>, Vec<&Post>) =
                posts.iter().partition(|p| p.is_restricted());

            staged.extend(unrestricted.into_iter().map(FeedEntry::from));

            for post in restricted {
                let Some(group) = post.audience else {
                    continue;
                };
                if self.may_see(owner, group, &mut visibility)? {
                    staged.push(FeedEntry::from(post));
                } else {
                    hidden += 1;
                }
            }
            debug!(owner = %owner, author = %member, posts = posts.len(), "aggregated author");
        }

        let feed = self.store.commit(owner, staged)?;
        info!(
            owner = %owner,
            population = population.len(),
            entries = feed.len(),
            hidden,
            generation = feed.generation,
            "rebuilt feed"
        );
        Ok(feed)
    }

    /// Read `owner`'s feed as left by the last rebuild.
    pub fn get(&self, owner: &MemberId) -> Result<Feed> {
        self.store.get(owner)
    }

    /// Empty `owner`'s feed.
    pub fn clear(&self, owner: &MemberId) -> Result<Feed> {
        self.store.clear(owner)
    }

    /// Drop `owner`'s feed. Returns `true` if one existed.
    pub fn delete(&self, owner: &MemberId) -> Result<bool> {
        self.store.delete(owner)
    }

    /// Members of `group`, for callers that scope a rebuild to one group.
    pub fn group_members(&self, group: &GroupId) -> Result<Vec<MemberId>> {
        self.audience.members_of(group)
    }

    /// The member who owns `group`.
    pub fn group_owner(&self, group: &GroupId) -> Result<MemberId> {
        self.audience.owner_of(group)
    }

    // Membership is resolved once per group per rebuild.
    fn may_see(
        &self,
        owner: &MemberId,
        group: GroupId,
        visibility: &mut HashMap<GroupId, bool>,
    ) -> Result<bool> {
        if let Some(visible) = visibility.get(&group) {
            return Ok(*visible);
        }
        let members = self.audience.members_of(&group).map_err(|e| {
            warn!(owner = %owner, group = %group, error = %e, "audience lookup failed");
            e
        })?;
        let visible = contains(&members, owner);
        visibility.insert(group, visible);
        Ok(visible)
    }
}
