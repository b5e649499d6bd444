//! High-level SDK for Kith.
//!
//! Provides one entry point, [`Kith`], over the membership sets, the
//! recommendation engine, and the feed aggregator. This is what the server
//! and CLI embed.

pub mod error;
pub mod friends;
pub mod kith;
pub mod profile;

pub use error::{KithError, KithResult};
pub use friends::{FriendGraph, InMemoryFriendGraph};
pub use kith::{Kith, KithParts};
pub use profile::{MemberProfile, Recommendation};

// Re-export key types
pub use kith_feed::{Feed, FeedEntry};
pub use kith_recommend::MatchReason;
pub use kith_types::{ErrorKind, GroupId, MemberId, Post, PostId};
