//! Tiered candidate ranking.
//!
//! Candidates present in both input sets rank first, then candidates only in
//! the first set, then candidates only in the second. Inside a tier the order
//! of the first set (or of the second, for the last tier) is kept as is, so
//! the same inputs always produce the same ranking.

use kith_sets::algebra::{contains, difference, intersection};
use kith_types::Canonical;
use serde::{Deserialize, Serialize};

/// Why a candidate was recommended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    /// Present in both sets.
    Both,
    /// Present only in the first set.
    OnlyA,
    /// Present only in the second set.
    OnlyB,
}

impl MatchReason {
    /// Tier index: 0 ranks highest.
    pub fn tier(&self) -> u8 {
        match self {
            Self::Both => 0,
            Self::OnlyA => 1,
            Self::OnlyB => 2,
        }
    }
}

/// Rank the union of `a` and `b` into `both ++ only_a ++ only_b`.
pub fn rank<T: Canonical + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let both = intersection(a, b);
    let only_a = difference(a, &both);
    let only_b = difference(b, &both);

    let mut ranked = Vec::with_capacity(both.len() + only_a.len() + only_b.len());
    ranked.extend(both);
    ranked.extend(only_a);
    ranked.extend(only_b);
    ranked
}

/// Classify `candidate` by its presence in `a` and `b`.
///
/// Returns `None` when the candidate is in neither set.
pub fn reason_for_match<T, C>(candidate: &C, a: &[T], b: &[T]) -> Option<MatchReason>
where
    T: Canonical,
    C: Canonical + ?Sized,
{
    match (contains(a, candidate), contains(b, candidate)) {
        (true, true) => Some(MatchReason::Both),
        (true, false) => Some(MatchReason::OnlyA),
        (false, true) => Some(MatchReason::OnlyB),
        (false, false) => None,
    }
}
