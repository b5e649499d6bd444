use std::sync::Arc;

use kith_sdk::Kith;
use tokio::net::TcpListener;

use crate::config::KithConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Kith HTTP server.
pub struct KithServer {
    config: KithConfig,
    kith: Arc<Kith>,
}

impl KithServer {
    /// A server over fresh in-memory stores.
    pub fn new(config: KithConfig) -> Self {
        Self::with_kith(config, Arc::new(Kith::in_memory()))
    }

    pub fn with_kith(config: KithConfig, kith: Arc<Kith>) -> Self {
        Self { config, kith }
    }

    pub fn config(&self) -> &KithConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(AppState {
            kith: self.kith.clone(),
            recommend: self.config.recommend.clone(),
        })
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(self.config.server.bind_addr).await?;
        tracing::info!("Kith server listening on {}", self.config.server.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
