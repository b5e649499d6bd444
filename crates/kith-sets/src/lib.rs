//! Membership sets and set algebra for Kith.
//!
//! A membership set is a named, ordered, non-deduplicated list of members:
//! everyone who registered with the same school, everyone from the same
//! hometown. Sets are created lazily by the first assignment and are never
//! deleted in normal operation.
//!
//! # Modules
//!
//! - [`algebra`]: pure, order-preserving `difference` and `intersection`
//! - [`set`]: the [`MembershipSet`] value type
//! - [`traits`]: the [`MembershipStore`] storage interface
//! - [`memory`]: [`InMemoryMembershipStore`] for tests and embedding
//! - [`error`]: [`SetError`]

pub mod algebra;
pub mod error;
pub mod memory;
pub mod set;
pub mod traits;

pub use algebra::{difference, intersection};
pub use error::{Result, SetError};
pub use memory::InMemoryMembershipStore;
pub use set::{validate_name, MembershipSet};
pub use traits::MembershipStore;
