//! HTTP server for Kith.
//!
//! Exposes membership sets, recommendation paging, and feed rebuilds as a
//! small JSON API. Requests act for the member named in the
//! `x-kith-viewer` header.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::{KithConfig, RecommendConfig, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use handler::{AppState, Viewer, VIEWER_HEADER};
pub use server::KithServer;
