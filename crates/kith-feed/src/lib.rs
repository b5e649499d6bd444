//! Audience-aware feed aggregation for Kith.
//!
//! Every member owns one materialized feed: an ordered list of references to
//! posts they are allowed to see. Feeds are not maintained incrementally.
//! Each rebuild walks a source population (the viewer's friends, or the
//! members of one of the viewer's groups), pulls each member's posts, drops
//! audience-restricted posts the viewer is not in the audience of, and
//! swaps the result in as the new generation.
//!
//! # Modules
//!
//! - [`aggregator`]: [`FeedAggregator`], the rebuild pipeline
//! - [`feed`]: [`Feed`] and [`FeedEntry`]
//! - [`source`]: the [`PostSource`] and [`AudienceLookup`] collaborators
//! - [`traits`]: the [`FeedStore`] storage interface
//! - [`memory`]: [`InMemoryFeedStore`]
//! - [`error`]: [`FeedError`]

pub mod aggregator;
pub mod error;
pub mod feed;
pub mod memory;
pub mod source;
pub mod traits;

pub use aggregator::FeedAggregator;
pub use error::{FeedError, Result};
pub use feed::{Feed, FeedEntry};
pub use memory::InMemoryFeedStore;
pub use source::{AudienceLookup, InMemoryAudience, InMemoryPostSource, PostSource};
pub use traits::FeedStore;
