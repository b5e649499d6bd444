use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all Kith endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route(
            "/v1/sets/:name/members/:member",
            put(handler::assign_member).delete(handler::remove_member),
        )
        .route("/v1/sets/:name/members", get(handler::list_members))
        .route("/v1/recommendations", post(handler::compute_recommendations))
        .route("/v1/recommendations/next", get(handler::next_recommendations))
        .route(
            "/v1/feed",
            get(handler::get_feed)
                .post(handler::create_feed)
                .delete(handler::clear_feed),
        )
        .route("/v1/feed/rebuild", post(handler::rebuild_feed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
