//! Foundation types for Kith.
//!
//! This crate provides the identifier, post, and error-classification types
//! shared by every other Kith crate.
//!
//! # Key Types
//!
//! - [`MemberId`], [`PostId`], [`GroupId`]: UUID-backed identifiers
//! - [`Canonical`]: the stable string form used for every id comparison
//! - [`Post`]: the slice of an externally owned post the core reads
//! - [`ErrorKind`]: coarse error classes callers render messages from

pub mod canonical;
pub mod error;
pub mod ids;
pub mod post;

pub use canonical::Canonical;
pub use error::{ErrorKind, TypeError};
pub use ids::{GroupId, MemberId, PostId};
pub use post::Post;
