//! The [`RecommendationStore`] trait defining recommendation persistence.

use kith_types::MemberId;

use crate::error::Result;
use crate::state::RecommendationState;

/// Storage backend for per-owner recommendation state.
///
/// Implementations must be thread-safe and provide:
/// - whole-state replacement (a new computation wipes the old ranking and
///   cursor in one step);
/// - a conditional cursor update keyed on `revision`, so concurrent
///   pagination for the same owner serializes instead of double-advancing.
pub trait RecommendationStore: Send + Sync {
    /// Read the current state for `owner`. Returns `Ok(None)` if none exists.
    fn get(&self, owner: &MemberId) -> Result<Option<RecommendationState>>;

    /// Store `state`, replacing anything held for the same owner.
    ///
    /// The store assigns the revision; the returned value is what was stored.
    fn replace(&self, state: RecommendationState) -> Result<RecommendationState>;

    /// Set the cursor of `owner`'s state to `cursor` if its revision is still
    /// `expected_revision`, bumping the revision.
    ///
    /// Returns `Ok(false)` when the revision moved on (another reader paged
    /// or a recomputation replaced the state). Fails with `NotFound` when no
    /// state exists.
    fn compare_and_set_cursor(
        &self,
        owner: &MemberId,
        expected_revision: u64,
        cursor: usize,
    ) -> Result<bool>;

    /// Drop `owner`'s state. Returns `true` if one existed.
    fn delete(&self, owner: &MemberId) -> Result<bool>;
}
