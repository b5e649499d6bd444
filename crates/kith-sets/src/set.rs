use kith_types::{Canonical, MemberId};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SetError};

/// Reject set names that are empty or only whitespace.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SetError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// A named, ordered list of members.
///
/// Membership is not deduplicated: assigning a member twice records them
/// twice. Every mutation returns a new value instead of editing in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipSet {
    pub name: String,
    pub members: Vec<MemberId>,
}

impl MembershipSet {
    /// A freshly created set holding exactly `first`.
    pub fn seeded(name: impl Into<String>, first: MemberId) -> Self {
        Self {
            name: name.into(),
            members: vec![first],
        }
    }

    /// This set with `member` appended at the end.
    pub fn with_member(&self, member: MemberId) -> Self {
        let mut members = Vec::with_capacity(self.members.len() + 1);
        members.extend_from_slice(&self.members);
        members.push(member);
        Self {
            name: self.name.clone(),
            members,
        }
    }

    /// This set without the first occurrence of `member`.
    ///
    /// Later duplicates stay. Returns `None` when `member` is absent.
    pub fn without_first(&self, member: &MemberId) -> Option<Self> {
        let idx = self.position(member)?;
        let mut members = self.members.clone();
        members.remove(idx);
        Some(Self {
            name: self.name.clone(),
            members,
        })
    }

    /// Index of the first canonical match for `member`.
    pub fn position(&self, member: &MemberId) -> Option<usize> {
        let key = member.canonical();
        self.members.iter().position(|m| m.canonical() == key)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(n: u128) -> MemberId {
        MemberId::from_u128(n)
    }

    #[test]
    fn blank_names_are_invalid() {
        assert!(validate_name("MIT").is_ok());
        assert_eq!(
            validate_name(" \t").unwrap_err(),
            SetError::InvalidName { name: " \t".into() }
        );
    }

    #[test]
    fn seeded_holds_one_member() {
        let set = MembershipSet::seeded("MIT", m(1));
        assert_eq!(set.members, vec![m(1)]);
    }

    #[test]
    fn with_member_leaves_original_alone() {
        let set = MembershipSet::seeded("MIT", m(1));
        let grown = set.with_member(m(1));
        assert_eq!(set.members, vec![m(1)]);
        assert_eq!(grown.members, vec![m(1), m(1)]);
    }

    #[test]
    fn without_first_removes_one_occurrence() {
        let set = MembershipSet::seeded("MIT", m(1))
            .with_member(m(2))
            .with_member(m(1));
        let shrunk = set.without_first(&m(1)).unwrap();
        assert_eq!(shrunk.members, vec![m(2), m(1)]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn without_first_absent_member_is_none() {
        let set = MembershipSet::seeded("MIT", m(1));
        assert!(set.without_first(&m(9)).is_none());
    }
}
