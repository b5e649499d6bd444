//! In-memory recommendation store for testing and ephemeral use.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use kith_types::MemberId;

use crate::error::{RecommendError, Result};
use crate::state::RecommendationState;
use crate::traits::RecommendationStore;

/// An in-memory implementation of [`RecommendationStore`].
///
/// All state lives in a `HashMap` behind a `RwLock`. Data is lost when the
/// store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryRecommendationStore {
    states: RwLock<HashMap<MemberId, RecommendationState>>,
}

impl InMemoryRecommendationStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of owners with stored recommendations.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<MemberId, RecommendationState>>> {
        self.states
            .read()
            .map_err(|e| RecommendError::Storage(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<MemberId, RecommendationState>>> {
        self.states
            .write()
            .map_err(|e| RecommendError::Storage(format!("lock poisoned: {e}")))
    }
}

impl RecommendationStore for InMemoryRecommendationStore {
    fn get(&self, owner: &MemberId) -> Result<Option<RecommendationState>> {
        Ok(self.read()?.get(owner).cloned())
    }

    fn replace(&self, mut state: RecommendationState) -> Result<RecommendationState> {
        let mut states = self.write()?;
        // Revisions never restart, even across replacements.
        state.revision = states.get(&state.owner).map_or(1, |prev| prev.revision + 1);
        states.insert(state.owner, state.clone());
        Ok(state)
    }

    fn compare_and_set_cursor(
        &self,
        owner: &MemberId,
        expected_revision: u64,
        cursor: usize,
    ) -> Result<bool> {
        let mut states = self.write()?;
        let state = states
            .get_mut(owner)
            .ok_or(RecommendError::NotFound { owner: *owner })?;
        if state.revision != expected_revision {
            return Ok(false);
        }
        if cursor < state.cursor {
            return Err(RecommendError::InvariantViolation(format!(
                "cursor for {owner} would move backward from {} to {cursor}",
                state.cursor
            )));
        }
        state.cursor = cursor;
        state.revision += 1;
        Ok(true)
    }

    fn delete(&self, owner: &MemberId) -> Result<bool> {
        Ok(self.write()?.remove(owner).is_some())
    }
}
