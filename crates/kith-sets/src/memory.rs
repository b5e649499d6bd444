//! In-memory membership store for testing and ephemeral use.
//!
//! [`InMemoryMembershipStore`] keeps every set in a `HashMap` protected by a
//! `RwLock`. Each operation takes the lock once, so assign/remove pairs on the
//! same set serialize cleanly.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use kith_types::MemberId;
use tracing::debug;

use crate::error::{Result, SetError};
use crate::set::{validate_name, MembershipSet};
use crate::traits::MembershipStore;

/// An in-memory implementation of [`MembershipStore`].
#[derive(Debug, Default)]
pub struct InMemoryMembershipStore {
    sets: RwLock<HashMap<String, MembershipSet>>,
}

impl InMemoryMembershipStore {
    /// Create a new empty membership store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A full copy of the set called `name`, if present.
    pub fn snapshot(&self, name: &str) -> Result<Option<MembershipSet>> {
        Ok(self.read()?.get(name).cloned())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, MembershipSet>>> {
        self.sets
            .read()
            .map_err(|e| SetError::Storage(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, MembershipSet>>> {
        self.sets
            .write()
            .map_err(|e| SetError::Storage(format!("lock poisoned: {e}")))
    }
}

impl MembershipStore for InMemoryMembershipStore {
    fn assign(&self, name: &str, member: MemberId) -> Result<()> {
        validate_name(name)?;
        let mut sets = self.write()?;
        let next = match sets.get(name) {
            Some(existing) => existing.with_member(member),
            None => {
                debug!(set = name, "creating membership set");
                MembershipSet::seeded(name, member)
            }
        };
        debug!(set = name, member = %member, size = next.len(), "assigned member");
        sets.insert(name.to_string(), next);
        Ok(())
    }

    fn remove(&self, name: &str, member: &MemberId) -> Result<bool> {
        let mut sets = self.write()?;
        let existing = sets.get(name).ok_or_else(|| SetError::NotFound {
            name: name.to_string(),
        })?;
        match existing.without_first(member) {
            Some(next) => {
                debug!(set = name, member = %member, size = next.len(), "removed member");
                sets.insert(name.to_string(), next);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn members(&self, name: &str) -> Result<Vec<MemberId>> {
        self.read()?
            .get(name)
            .map(|set| set.members.clone())
            .ok_or_else(|| SetError::NotFound {
                name: name.to_string(),
            })
    }

    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.read()?.contains_key(name))
    }

    fn set_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.read()?.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(n: u128) -> MemberId {
        MemberId::from_u128(n)
    }

    // ---- Test 1: First assignment creates the set ----
    #[test]
    fn first_assign_creates_set() {
        let store = InMemoryMembershipStore::new();
        assert!(!store.exists("MIT").unwrap());

        store.assign("MIT", m(1)).unwrap();

        assert!(store.exists("MIT").unwrap());
        assert_eq!(store.members("MIT").unwrap(), vec![m(1)]);
    }

    // ---- Test 2: Later assignments append in order ----
    #[test]
    fn assign_appends_in_order() {
        let store = InMemoryMembershipStore::new();
        store.assign("Boston", m(3)).unwrap();
        store.assign("Boston", m(1)).unwrap();
        store.assign("Boston", m(2)).unwrap();
        assert_eq!(store.members("Boston").unwrap(), vec![m(3), m(1), m(2)]);
    }

    // ---- Test 3: Duplicate assignment is recorded twice ----
    #[test]
    fn duplicate_assign_is_not_deduplicated() {
        let store = InMemoryMembershipStore::new();
        store.assign("X", m(1)).unwrap();
        store.assign("X", m(1)).unwrap();
        assert_eq!(store.members("X").unwrap(), vec![m(1), m(1)]);
    }

    // ---- Test 4: Reading an unknown set is NotFound ----
    #[test]
    fn members_of_unknown_set_is_not_found() {
        let store = InMemoryMembershipStore::new();
        let err = store.members("nowhere").unwrap_err();
        assert_eq!(
            err,
            SetError::NotFound {
                name: "nowhere".into()
            }
        );
    }

    // ---- Test 5: Removing from an unknown set is NotFound ----
    #[test]
    fn remove_from_unknown_set_is_not_found() {
        let store = InMemoryMembershipStore::new();
        let err = store.remove("nowhere", &m(1)).unwrap_err();
        assert!(matches!(err, SetError::NotFound { .. }));
    }

    // ---- Test 6: Removing an absent member is a silent no-op ----
    #[test]
    fn remove_absent_member_is_noop() {
        let store = InMemoryMembershipStore::new();
        store.assign("X", m(1)).unwrap();
        store.assign("X", m(2)).unwrap();

        let removed = store.remove("X", &m(9)).unwrap();

        assert!(!removed);
        assert_eq!(store.members("X").unwrap(), vec![m(1), m(2)]);
    }

    // ---- Test 7: Remove takes only the first occurrence ----
    #[test]
    fn remove_takes_first_occurrence_only() {
        let store = InMemoryMembershipStore::new();
        store.assign("X", m(1)).unwrap();
        store.assign("X", m(2)).unwrap();
        store.assign("X", m(1)).unwrap();
        store.assign("X", m(3)).unwrap();

        assert!(store.remove("X", &m(1)).unwrap());

        assert_eq!(store.members("X").unwrap(), vec![m(2), m(1), m(3)]);
    }

    // ---- Test 8: Emptied sets still exist ----
    #[test]
    fn emptied_set_still_exists() {
        let store = InMemoryMembershipStore::new();
        store.assign("X", m(1)).unwrap();
        store.remove("X", &m(1)).unwrap();
        assert!(store.exists("X").unwrap());
        assert!(store.members("X").unwrap().is_empty());
    }

    // ---- Test 9: Blank names are rejected ----
    #[test]
    fn blank_name_is_rejected() {
        let store = InMemoryMembershipStore::new();
        let err = store.assign("  ", m(1)).unwrap_err();
        assert!(matches!(err, SetError::InvalidName { .. }));
        assert!(store.set_names().unwrap().is_empty());
    }

    // ---- Test 10: Set names are listed sorted ----
    #[test]
    fn set_names_are_sorted() {
        let store = InMemoryMembershipStore::new();
        store.assign("Stanford", m(1)).unwrap();
        store.assign("Austin", m(1)).unwrap();
        store.assign("MIT", m(2)).unwrap();
        assert_eq!(store.set_names().unwrap(), vec!["Austin", "MIT", "Stanford"]);
    }

    // ---- Test 11: Returned member lists are detached copies ----
    #[test]
    fn members_are_copies() {
        let store = InMemoryMembershipStore::new();
        store.assign("X", m(1)).unwrap();
        let mut seen = store.members("X").unwrap();
        seen.push(m(2));
        assert_eq!(store.members("X").unwrap(), vec![m(1)]);
        assert_eq!(store.snapshot("X").unwrap().unwrap().len(), 1);
    }
}
