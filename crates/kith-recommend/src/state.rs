use chrono::{DateTime, Utc};
use kith_types::MemberId;
use serde::{Deserialize, Serialize};

use crate::error::{RecommendError, Result};

/// The persisted ranking for one owner plus a read cursor.
///
/// `cursor` is the offset of the next unread candidate. It advances by the
/// requested page size, not by the number of candidates actually returned,
/// so it may end up past `candidates.len()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationState {
    pub owner: MemberId,
    pub candidates: Vec<MemberId>,
    pub cursor: usize,
    /// Bumped by the store on every write; used for compare-and-set.
    pub revision: u64,
    pub computed_at: DateTime<Utc>,
}

/// One page cut from a [`RecommendationState`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<MemberId>,
    /// Where the cursor lands once this page has been handed out.
    pub next_cursor: usize,
}

impl RecommendationState {
    /// A new state whose first `first_page` candidates count as already read.
    pub fn new(owner: MemberId, candidates: Vec<MemberId>, first_page: usize) -> Self {
        Self {
            owner,
            candidates,
            cursor: first_page,
            revision: 0,
            computed_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Whether the next read would fail with `Exhausted`.
    ///
    /// A cursor exactly at the end is not exhausted: it reads one empty page.
    pub fn is_exhausted(&self) -> bool {
        self.cursor > self.candidates.len()
    }

    /// Candidates not yet handed out.
    pub fn remaining(&self) -> usize {
        self.candidates.len().saturating_sub(self.cursor)
    }

    /// Cut the page starting at the cursor without moving it.
    pub fn page(&self, page_size: usize) -> Result<Page> {
        if page_size == 0 {
            return Err(RecommendError::InvalidPageSize);
        }
        if self.is_exhausted() {
            return Err(RecommendError::Exhausted {
                owner: self.owner,
                cursor: self.cursor,
                len: self.candidates.len(),
            });
        }
        let end = self.cursor.saturating_add(page_size).min(self.candidates.len());
        let next_cursor = self
            .cursor
            .checked_add(page_size)
            .ok_or_else(|| RecommendError::InvariantViolation("cursor overflow".into()))?;
        Ok(Page {
            items: self.candidates[self.cursor..end].to_vec(),
            next_cursor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(n: u128) -> MemberId {
        MemberId::from_u128(n)
    }

    fn five() -> Vec<MemberId> {
        (1..=5).map(m).collect()
    }

    #[test]
    fn page_slices_from_cursor() {
        let state = RecommendationState::new(m(100), five(), 2);
        let page = state.page(2).unwrap();
        assert_eq!(page.items, vec![m(3), m(4)]);
        assert_eq!(page.next_cursor, 4);
    }

    #[test]
    fn short_tail_page_still_advances_full_page_size() {
        let state = RecommendationState::new(m(100), five(), 4);
        let page = state.page(2).unwrap();
        assert_eq!(page.items, vec![m(5)]);
        assert_eq!(page.next_cursor, 6);
    }

    #[test]
    fn cursor_at_end_reads_empty_page() {
        let state = RecommendationState::new(m(100), five(), 5);
        assert!(!state.is_exhausted());
        let page = state.page(3).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_cursor, 8);
    }

    #[test]
    fn cursor_past_end_is_exhausted() {
        let state = RecommendationState::new(m(100), five(), 6);
        let err = state.page(2).unwrap_err();
        assert_eq!(
            err,
            RecommendError::Exhausted {
                owner: m(100),
                cursor: 6,
                len: 5
            }
        );
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let state = RecommendationState::new(m(100), five(), 0);
        assert_eq!(state.page(0).unwrap_err(), RecommendError::InvalidPageSize);
    }

    #[test]
    fn remaining_saturates() {
        let state = RecommendationState::new(m(100), five(), 7);
        assert_eq!(state.remaining(), 0);
        assert_eq!(RecommendationState::new(m(100), five(), 2).remaining(), 3);
    }
}
