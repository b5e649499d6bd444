//! Set-based recommendations for Kith.
//!
//! Given two membership sets for a viewer (say, everyone from their school
//! and everyone from their hometown), the engine ranks candidates by shared
//! affinity, persists the ranking per viewer, and hands it out page by page.
//!
//! # Ranking
//!
//! `both ++ only_a ++ only_b`, each tier in its source set's order. No
//! scoring, no randomness: identical inputs give identical rankings.
//!
//! # Pagination
//!
//! The stored cursor advances by the requested page size, not by the number
//! of candidates returned. Reading with the cursor exactly at the end yields
//! an empty page; reading with the cursor past the end fails with
//! [`RecommendError::Exhausted`]. Cursor updates are compare-and-set on a
//! per-owner revision, so concurrent readers never receive the same
//! candidates twice.

pub mod engine;
pub mod error;
pub mod memory;
pub mod rank;
pub mod state;
pub mod traits;

pub use engine::{RecommendationEngine, DEFAULT_CAS_ATTEMPTS};
pub use error::{RecommendError, Result};
pub use memory::InMemoryRecommendationStore;
pub use rank::{rank, reason_for_match, MatchReason};
pub use state::{Page, RecommendationState};
pub use traits::RecommendationStore;
