use std::sync::Arc;

use kith_feed::{
    AudienceLookup, Feed, FeedAggregator, FeedStore, InMemoryAudience, InMemoryFeedStore,
    InMemoryPostSource, PostSource,
};
use kith_recommend::{InMemoryRecommendationStore, RecommendationEngine, RecommendationStore};
use kith_sets::algebra::difference;
use kith_sets::{validate_name, InMemoryMembershipStore, MembershipStore};
use kith_types::{GroupId, MemberId};
use tracing::{debug, info, warn};

use crate::error::{KithError, KithResult};
use crate::friends::{FriendGraph, InMemoryFriendGraph};
use crate::profile::{MemberProfile, Recommendation};

/// The stores and collaborators a [`Kith`] instance is wired from.
///
/// Each is created once at process start and shared by handle.
#[derive(Clone)]
pub struct KithParts {
    pub sets: Arc<dyn MembershipStore>,
    pub recommendations: Arc<dyn RecommendationStore>,
    pub feeds: Arc<dyn FeedStore>,
    pub posts: Arc<dyn PostSource>,
    pub audience: Arc<dyn AudienceLookup>,
    pub friends: Arc<dyn FriendGraph>,
}

impl KithParts {
    /// Every part backed by its in-memory implementation.
    pub fn in_memory() -> Self {
        Self {
            sets: Arc::new(InMemoryMembershipStore::new()),
            recommendations: Arc::new(InMemoryRecommendationStore::new()),
            feeds: Arc::new(InMemoryFeedStore::new()),
            posts: Arc::new(InMemoryPostSource::new()),
            audience: Arc::new(InMemoryAudience::new()),
            friends: Arc::new(InMemoryFriendGraph::new()),
        }
    }
}

/// High-level Kith API.
///
/// Ties the membership sets, the recommendation engine, and the feed
/// aggregator to the application rules: members join the sets named by their
/// school and hometown, recommendations exclude the viewer and their friends,
/// and feeds are built from friends or from one of the viewer's own groups.
pub struct Kith {
    sets: Arc<dyn MembershipStore>,
    friends: Arc<dyn FriendGraph>,
    recommendations: RecommendationEngine,
    feeds: FeedAggregator,
}

impl Kith {
    pub fn new(parts: KithParts) -> Self {
        Self {
            recommendations: RecommendationEngine::new(parts.recommendations, parts.sets.clone()),
            feeds: FeedAggregator::new(parts.feeds, parts.posts, parts.audience),
            sets: parts.sets,
            friends: parts.friends,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(KithParts::in_memory())
    }

    pub fn sets(&self) -> &dyn MembershipStore {
        self.sets.as_ref()
    }

    pub fn recommendations(&self) -> &RecommendationEngine {
        &self.recommendations
    }

    pub fn feeds(&self) -> &FeedAggregator {
        &self.feeds
    }

    // ---- Account setup ----

    /// Set up a freshly created account: an empty feed, plus membership in
    /// the school and hometown sets.
    ///
    /// Either all three happen or none do, so a failed registration can be
    /// retried.
    pub fn register(&self, profile: &MemberProfile) -> KithResult<()> {
        validate_name(&profile.school)?;
        validate_name(&profile.hometown)?;
        self.feeds.create(profile.id)?;
        if let Err(e) = self.join_sets(profile) {
            warn!(member = %profile.id, error = %e, "registration failed, dropping feed");
            self.feeds.delete(&profile.id)?;
            return Err(e);
        }
        info!(member = %profile.id, school = %profile.school, hometown = %profile.hometown, "registered member");
        Ok(())
    }

    fn join_sets(&self, profile: &MemberProfile) -> KithResult<()> {
        self.sets.assign(&profile.school, profile.id)?;
        if let Err(e) = self.sets.assign(&profile.hometown, profile.id) {
            self.sets.remove(&profile.school, &profile.id)?;
            return Err(e.into());
        }
        Ok(())
    }

    /// Move a member to a new school set and return the updated profile.
    ///
    /// The new assignment happens before the old removal, so the member is
    /// never missing from both.
    pub fn change_school(
        &self,
        profile: &MemberProfile,
        new_school: &str,
    ) -> KithResult<MemberProfile> {
        self.sets.assign(new_school, profile.id)?;
        self.sets.remove(&profile.school, &profile.id)?;
        debug!(member = %profile.id, from = %profile.school, to = new_school, "changed school");
        Ok(MemberProfile {
            school: new_school.to_string(),
            ..profile.clone()
        })
    }

    // ---- Recommendations ----

    /// Rank everyone sharing the viewer's school or hometown (minus the
    /// viewer and their friends) and return the first page with reasons.
    pub fn recommend(
        &self,
        profile: &MemberProfile,
        page_size: usize,
    ) -> KithResult<Vec<Recommendation>> {
        let (school, hometown) = self.candidate_sets(profile)?;
        let page = self
            .recommendations
            .compute(profile.id, &school, &hometown, page_size)?;
        Ok(self.annotate(profile, page, &school, &hometown))
    }

    /// The next page of the viewer's stored ranking, with reasons computed
    /// against the current sets.
    pub fn more_recommendations(
        &self,
        profile: &MemberProfile,
        page_size: usize,
    ) -> KithResult<Vec<Recommendation>> {
        let page = self.recommendations.next_page(&profile.id, page_size)?;
        let (school, hometown) = self.candidate_sets(profile)?;
        Ok(self.annotate(profile, page, &school, &hometown))
    }

    fn candidate_sets(&self, profile: &MemberProfile) -> KithResult<(Vec<MemberId>, Vec<MemberId>)> {
        let mut exclude = self.friends.friends_of(&profile.id)?;
        exclude.push(profile.id);
        let school = difference(&self.sets.members(&profile.school)?, &exclude);
        let hometown = difference(&self.sets.members(&profile.hometown)?, &exclude);
        Ok((school, hometown))
    }

    // Candidates that left both sets since the ranking was stored have no
    // reason any more and are dropped from the annotated page.
    fn annotate(
        &self,
        profile: &MemberProfile,
        page: Vec<MemberId>,
        school: &[MemberId],
        hometown: &[MemberId],
    ) -> Vec<Recommendation> {
        page.into_iter()
            .filter_map(|member| {
                let reason = self
                    .recommendations
                    .reason_for_match(&member, school, hometown)?;
                Some(Recommendation {
                    member,
                    reason,
                    explanation: profile.explain(reason),
                })
            })
            .collect()
    }

    // ---- Feeds ----

    /// Rebuild the viewer's feed from their friends, or from the members of
    /// `group` when given. Only the group's owner may scope a feed by it.
    pub fn generate_feed(&self, viewer: &MemberId, group: Option<&GroupId>) -> KithResult<Feed> {
        let population = match group {
            Some(group) => {
                let owner = self.feeds.group_owner(group)?;
                if owner != *viewer {
                    return Err(KithError::NotGroupOwner {
                        member: *viewer,
                        group: *group,
                    });
                }
                self.feeds.group_members(group)?
            }
            None => self.friends.friends_of(viewer)?,
        };
        Ok(self.feeds.rebuild(viewer, &population)?)
    }

    pub fn feed(&self, viewer: &MemberId) -> KithResult<Feed> {
        Ok(self.feeds.get(viewer)?)
    }

    pub fn clear_feed(&self, viewer: &MemberId) -> KithResult<Feed> {
        Ok(self.feeds.clear(viewer)?)
    }
}
