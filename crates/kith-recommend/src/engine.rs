use std::sync::Arc;

use kith_sets::algebra::difference;
use kith_sets::MembershipStore;
use kith_types::MemberId;
use tracing::{debug, info};

use crate::error::{RecommendError, Result};
use crate::rank::{rank, reason_for_match, MatchReason};
use crate::state::RecommendationState;
use crate::traits::RecommendationStore;

/// How many times `next_page` retries a lost cursor race before giving up.
pub const DEFAULT_CAS_ATTEMPTS: usize = 128;

/// Ranks candidates from two membership sets and pages through the result.
///
/// The engine itself holds no per-owner state; rankings and cursors live in
/// the [`RecommendationStore`] it was built with.
pub struct RecommendationEngine {
    store: Arc<dyn RecommendationStore>,
    sets: Arc<dyn MembershipStore>,
    cas_attempts: usize,
}

impl RecommendationEngine {
    pub fn new(store: Arc<dyn RecommendationStore>, sets: Arc<dyn MembershipStore>) -> Self {
        Self {
            store,
            sets,
            cas_attempts: DEFAULT_CAS_ATTEMPTS,
        }
    }

    /// Override the retry budget for contended cursor updates.
    pub fn with_cas_attempts(mut self, attempts: usize) -> Self {
        self.cas_attempts = attempts.max(1);
        self
    }

    /// Rank `a` and `b`, persist the ranking for `owner` (replacing any prior
    /// one), and return the first page.
    ///
    /// The stored cursor points just past the returned page.
    pub fn compute(
        &self,
        owner: MemberId,
        a: &[MemberId],
        b: &[MemberId],
        page_size: usize,
    ) -> Result<Vec<MemberId>> {
        if page_size == 0 {
            return Err(RecommendError::InvalidPageSize);
        }
        let ranked = rank(a, b);
        let first: Vec<MemberId> = ranked.iter().take(page_size).copied().collect();
        let stored = self
            .store
            .replace(RecommendationState::new(owner, ranked, page_size))?;
        info!(
            owner = %owner,
            candidates = stored.len(),
            revision = stored.revision,
            "computed recommendations"
        );
        Ok(first)
    }

    /// Like [`compute`](Self::compute), reading both inputs from named
    /// membership sets and dropping everyone in `exclude` first.
    ///
    /// Missing sets fail with `NotFound`.
    pub fn compute_from_sets(
        &self,
        owner: MemberId,
        set_a: &str,
        set_b: &str,
        exclude: &[MemberId],
        page_size: usize,
    ) -> Result<Vec<MemberId>> {
        let a = difference(&self.sets.members(set_a)?, exclude);
        let b = difference(&self.sets.members(set_b)?, exclude);
        debug!(owner = %owner, set_a, set_b, a = a.len(), b = b.len(), "loaded candidate sets");
        self.compute(owner, &a, &b, page_size)
    }

    /// Return the next page of `owner`'s stored ranking and advance the
    /// cursor by `page_size`.
    ///
    /// Fails with `NotFound` if nothing was computed for `owner`, and with
    /// `Exhausted` once the cursor has moved past the end. A cursor sitting
    /// exactly at the end yields one empty page first.
    pub fn next_page(&self, owner: &MemberId, page_size: usize) -> Result<Vec<MemberId>> {
        if page_size == 0 {
            return Err(RecommendError::InvalidPageSize);
        }
        for attempt in 1..=self.cas_attempts {
            let state = self
                .store
                .get(owner)?
                .ok_or(RecommendError::NotFound { owner: *owner })?;
            let page = state.page(page_size)?;
            if self
                .store
                .compare_and_set_cursor(owner, state.revision, page.next_cursor)?
            {
                debug!(
                    owner = %owner,
                    from = state.cursor,
                    to = page.next_cursor,
                    returned = page.items.len(),
                    "advanced recommendation cursor"
                );
                return Ok(page.items);
            }
            debug!(owner = %owner, attempt, "cursor race lost, retrying");
        }
        Err(RecommendError::CursorContention {
            owner: *owner,
            attempts: self.cas_attempts,
        })
    }

    /// Classify `candidate` against the two sets it was ranked from.
    pub fn reason_for_match(
        &self,
        candidate: &MemberId,
        a: &[MemberId],
        b: &[MemberId],
    ) -> Option<MatchReason> {
        reason_for_match(candidate, a, b)
    }

    /// The stored state for `owner`, if any.
    pub fn state(&self, owner: &MemberId) -> Result<Option<RecommendationState>> {
        self.store.get(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryRecommendationStore;
    use kith_sets::{InMemoryMembershipStore, SetError};
    use std::collections::HashSet;

    fn m(n: u128) -> MemberId {
        MemberId::from_u128(n)
    }

    fn engine() -> RecommendationEngine {
        RecommendationEngine::new(
            Arc::new(InMemoryRecommendationStore::new()),
            Arc::new(InMemoryMembershipStore::new()),
        )
    }

    fn engine_with_sets(sets: Arc<InMemoryMembershipStore>) -> RecommendationEngine {
        RecommendationEngine::new(Arc::new(InMemoryRecommendationStore::new()), sets)
    }

    const OWNER: MemberId = MemberId::from_u128(1000);

    #[test]
    fn compute_ranks_by_tier() {
        let engine = engine();
        let a = [m(1), m(2), m(3)];
        let b = [m(2), m(3), m(4)];

        let page = engine.compute(OWNER, &a, &b, 10).unwrap();

        assert_eq!(page, vec![m(2), m(3), m(1), m(4)]);
    }

    #[test]
    fn compute_persists_cursor_after_first_page() {
        let engine = engine();
        let page = engine.compute(OWNER, &[m(1), m(2), m(3)], &[], 2).unwrap();
        assert_eq!(page, vec![m(1), m(2)]);

        let state = engine.state(&OWNER).unwrap().unwrap();
        assert_eq!(state.cursor, 2);
        assert_eq!(state.candidates, vec![m(1), m(2), m(3)]);
    }

    #[test]
    fn pagination_walks_then_exhausts() {
        let engine = engine();
        let a: Vec<MemberId> = (1..=5).map(m).collect();

        assert_eq!(engine.compute(OWNER, &a, &[], 2).unwrap(), vec![m(1), m(2)]);
        assert_eq!(engine.next_page(&OWNER, 2).unwrap(), vec![m(3), m(4)]);
        assert_eq!(engine.next_page(&OWNER, 2).unwrap(), vec![m(5)]);

        let err = engine.next_page(&OWNER, 2).unwrap_err();
        assert_eq!(
            err,
            RecommendError::Exhausted {
                owner: OWNER,
                cursor: 6,
                len: 5
            }
        );
    }

    #[test]
    fn cursor_exactly_at_end_reads_one_empty_page() {
        let engine = engine();
        let a: Vec<MemberId> = (1..=4).map(m).collect();

        engine.compute(OWNER, &a, &[], 2).unwrap();
        assert_eq!(engine.next_page(&OWNER, 2).unwrap(), vec![m(3), m(4)]);
        assert!(engine.next_page(&OWNER, 2).unwrap().is_empty());
        assert!(matches!(
            engine.next_page(&OWNER, 2),
            Err(RecommendError::Exhausted { .. })
        ));
    }

    #[test]
    fn next_page_without_state_is_not_found() {
        let engine = engine();
        let err = engine.next_page(&OWNER, 2).unwrap_err();
        assert_eq!(err, RecommendError::NotFound { owner: OWNER });
        assert_eq!(err.kind(), kith_types::ErrorKind::NotFound);
    }

    #[test]
    fn recompute_replaces_ranking_and_resets_cursor() {
        let engine = engine();
        engine.compute(OWNER, &[m(1), m(2), m(3)], &[], 1).unwrap();
        engine.next_page(&OWNER, 1).unwrap();
        engine.next_page(&OWNER, 1).unwrap();

        let page = engine.compute(OWNER, &[m(7), m(8)], &[], 1).unwrap();

        assert_eq!(page, vec![m(7)]);
        assert_eq!(engine.next_page(&OWNER, 1).unwrap(), vec![m(8)]);
    }

    #[test]
    fn page_size_may_change_between_calls() {
        let engine = engine();
        let a: Vec<MemberId> = (1..=6).map(m).collect();
        engine.compute(OWNER, &a, &[], 1).unwrap();
        assert_eq!(engine.next_page(&OWNER, 3).unwrap(), vec![m(2), m(3), m(4)]);
        assert_eq!(engine.next_page(&OWNER, 1).unwrap(), vec![m(5)]);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let engine = engine();
        assert_eq!(
            engine.compute(OWNER, &[m(1)], &[], 0).unwrap_err(),
            RecommendError::InvalidPageSize
        );
        assert_eq!(
            engine.next_page(&OWNER, 0).unwrap_err(),
            RecommendError::InvalidPageSize
        );
    }

    #[test]
    fn empty_ranking_first_next_page_is_exhausted() {
        let engine = engine();
        assert!(engine.compute(OWNER, &[], &[], 3).unwrap().is_empty());
        assert!(matches!(
            engine.next_page(&OWNER, 3),
            Err(RecommendError::Exhausted { .. })
        ));
    }

    #[test]
    fn owners_do_not_share_cursors() {
        let engine = engine();
        let other = m(2000);
        engine.compute(OWNER, &[m(1), m(2)], &[], 1).unwrap();
        engine.compute(other, &[m(1), m(2)], &[], 1).unwrap();
        assert_eq!(engine.next_page(&OWNER, 1).unwrap(), vec![m(2)]);
        assert_eq!(engine.next_page(&other, 1).unwrap(), vec![m(2)]);
    }

    #[test]
    fn compute_from_sets_excludes_owner_and_friends() {
        let sets = Arc::new(InMemoryMembershipStore::new());
        for n in [1000, 1, 2, 3] {
            sets.assign("MIT", m(n)).unwrap();
        }
        for n in [2, 3, 4, 1000] {
            sets.assign("Boston", m(n)).unwrap();
        }
        let engine = engine_with_sets(sets);

        let page = engine
            .compute_from_sets(OWNER, "MIT", "Boston", &[OWNER, m(3)], 10)
            .unwrap();

        assert_eq!(page, vec![m(2), m(1), m(4)]);
    }

    #[test]
    fn compute_from_missing_set_is_not_found() {
        let engine = engine();
        let err = engine
            .compute_from_sets(OWNER, "MIT", "Boston", &[], 10)
            .unwrap_err();
        assert_eq!(
            err,
            RecommendError::Set(SetError::NotFound { name: "MIT".into() })
        );
    }

    #[test]
    fn reason_for_match_delegates_to_ranking() {
        let engine = engine();
        let a = [m(1), m(2)];
        let b = [m(2)];
        assert_eq!(engine.reason_for_match(&m(2), &a, &b), Some(MatchReason::Both));
        assert_eq!(engine.reason_for_match(&m(1), &a, &b), Some(MatchReason::OnlyA));
        assert_eq!(engine.reason_for_match(&m(9), &a, &b), None);
    }

    #[test]
    fn concurrent_pagination_hands_out_each_candidate_once() {
        let engine = Arc::new(engine());
        let candidates: Vec<MemberId> = (1..=200).map(m).collect();
        engine.compute(OWNER, &candidates, &[], 1).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    let mut seen = Vec::new();
                    while let Ok(page) = engine.next_page(&OWNER, 3) {
                        seen.extend(page);
                    }
                    seen
                })
            })
            .collect();

        let mut all = vec![m(1)];
        for handle in handles {
            all.extend(handle.join().unwrap());
        }
        let unique: HashSet<MemberId> = all.iter().copied().collect();
        assert_eq!(all.len(), 200);
        assert_eq!(unique.len(), 200);
    }

    /// Every cursor update loses the race.
    struct ContendedStore {
        inner: InMemoryRecommendationStore,
        cas_calls: std::sync::atomic::AtomicUsize,
    }

    impl RecommendationStore for ContendedStore {
        fn get(&self, owner: &MemberId) -> Result<Option<RecommendationState>> {
            self.inner.get(owner)
        }
        fn replace(&self, state: RecommendationState) -> Result<RecommendationState> {
            self.inner.replace(state)
        }
        fn compare_and_set_cursor(&self, _: &MemberId, _: u64, _: usize) -> Result<bool> {
            self.cas_calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(false)
        }
        fn delete(&self, owner: &MemberId) -> Result<bool> {
            self.inner.delete(owner)
        }
    }

    #[test]
    fn lost_cursor_races_give_up_after_budget() {
        let store = Arc::new(ContendedStore {
            inner: InMemoryRecommendationStore::new(),
            cas_calls: Default::default(),
        });
        let engine = RecommendationEngine::new(store.clone(), Arc::new(InMemoryMembershipStore::new()))
            .with_cas_attempts(5);
        engine.compute(OWNER, &[m(1), m(2), m(3), m(4)], &[], 2).unwrap();

        let err = engine.next_page(&OWNER, 2).unwrap_err();
        assert!(matches!(
            err,
            RecommendError::CursorContention { owner, attempts: 5 } if owner == OWNER
        ));
        assert_eq!(err.kind(), kith_types::ErrorKind::Conflict);
        assert_eq!(store.cas_calls.load(std::sync::atomic::Ordering::SeqCst), 5);
        assert_eq!(engine.state(&OWNER).unwrap().unwrap().cursor, 2);
    }

    #[test]
    fn zero_cas_attempts_still_tries_once() {
        let store = Arc::new(ContendedStore {
            inner: InMemoryRecommendationStore::new(),
            cas_calls: Default::default(),
        });
        let engine = RecommendationEngine::new(store.clone(), Arc::new(InMemoryMembershipStore::new()))
            .with_cas_attempts(0);
        engine.compute(OWNER, &[m(1)], &[], 1).unwrap();

        assert!(matches!(
            engine.next_page(&OWNER, 1),
            Err(RecommendError::CursorContention { attempts: 1, .. })
        ));
        assert_eq!(store.cas_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
