//! Read access to the friend graph.
//!
//! Friend requests and their workflow live elsewhere; Kith only needs the
//! accepted friend list of a member, in the order friendships were made.

use std::collections::HashMap;
use std::sync::RwLock;

use kith_types::MemberId;

use crate::error::{KithError, KithResult};

pub trait FriendGraph: Send + Sync {
    /// `member`'s friends, oldest friendship first.
    fn friends_of(&self, member: &MemberId) -> KithResult<Vec<MemberId>>;
}

/// [`FriendGraph`] backed by a symmetric adjacency map.
#[derive(Debug, Default)]
pub struct InMemoryFriendGraph {
    edges: RwLock<HashMap<MemberId, Vec<MemberId>>>,
}

impl InMemoryFriendGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a friendship in both directions. Repeats are ignored.
    pub fn befriend(&self, a: MemberId, b: MemberId) -> KithResult<()> {
        let mut edges = self
            .edges
            .write()
            .map_err(|e| KithError::Friends(format!("lock poisoned: {e}")))?;
        for (from, to) in [(a, b), (b, a)] {
            let list = edges.entry(from).or_default();
            if !list.contains(&to) {
                list.push(to);
            }
        }
        Ok(())
    }

    /// Remove a friendship in both directions.
    pub fn unfriend(&self, a: &MemberId, b: &MemberId) -> KithResult<()> {
        let mut edges = self
            .edges
            .write()
            .map_err(|e| KithError::Friends(format!("lock poisoned: {e}")))?;
        for (from, to) in [(a, b), (b, a)] {
            if let Some(list) = edges.get_mut(from) {
                list.retain(|m| m != to);
            }
        }
        Ok(())
    }
}

impl FriendGraph for InMemoryFriendGraph {
    fn friends_of(&self, member: &MemberId) -> KithResult<Vec<MemberId>> {
        let edges = self
            .edges
            .read()
            .map_err(|e| KithError::Friends(format!("lock poisoned: {e}")))?;
        Ok(edges.get(member).cloned().unwrap_or_default())
    }
}
