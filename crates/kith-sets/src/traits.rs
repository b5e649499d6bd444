//! The [`MembershipStore`] trait defining the membership storage interface.

use kith_types::MemberId;

use crate::error::Result;

/// Storage backend for named membership sets.
///
/// Implementations must be thread-safe (`Send + Sync`) and apply each
/// operation atomically per set: a concurrent `assign` and `remove` on the
/// same set must not lose either update.
pub trait MembershipStore: Send + Sync {
    /// Append `member` to the set called `name`, creating the set (seeded with
    /// `member`) if it does not exist yet.
    ///
    /// Already-present members are appended again.
    fn assign(&self, name: &str, member: MemberId) -> Result<()>;

    /// Remove the first occurrence of `member` from the set called `name`.
    ///
    /// Fails with `NotFound` when the set does not exist. Returns `Ok(false)`
    /// without touching the set when `member` is not in it.
    fn remove(&self, name: &str, member: &MemberId) -> Result<bool>;

    /// The members of the set called `name`, in assignment order.
    ///
    /// Fails with `NotFound` when the set does not exist.
    fn members(&self, name: &str) -> Result<Vec<MemberId>>;

    /// Whether a set called `name` has been created.
    fn exists(&self, name: &str) -> Result<bool>;

    /// Names of every known set, sorted.
    fn set_names(&self) -> Result<Vec<String>>;
}
