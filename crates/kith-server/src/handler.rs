use std::sync::Arc;

use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::Json;
use kith_feed::Feed;
use kith_sdk::Kith;
use kith_types::{GroupId, MemberId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::RecommendConfig;
use crate::error::{ServerError, ServerResult};

/// Header carrying the id of the member a request acts for.
pub const VIEWER_HEADER: &str = "x-kith-viewer";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub kith: Arc<Kith>,
    pub recommend: RecommendConfig,
}

/// The member a request acts for, taken from [`VIEWER_HEADER`].
#[derive(Clone, Copy, Debug)]
pub struct Viewer(pub MemberId);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Viewer {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(VIEWER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ServerError::MissingViewer)?;
        Ok(Self(MemberId::parse(raw)?))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetMembers {
    pub name: String,
    pub members: Vec<MemberId>,
}

#[derive(Debug, Deserialize)]
pub struct ComputeRequest {
    pub a: Vec<MemberId>,
    pub b: Vec<MemberId>,
    #[serde(default)]
    pub page_size: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page_size: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageResponse {
    pub items: Vec<MemberId>,
    pub remaining: usize,
}

/// Either an explicit population, or a group (or the viewer's friends when
/// neither is given). Sending both is rejected.
#[derive(Debug, Default, Deserialize)]
pub struct RebuildRequest {
    #[serde(default)]
    pub population: Option<Vec<MemberId>>,
    #[serde(default)]
    pub group: Option<GroupId>,
}

/// Health check handler.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "name": "kith-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---- Membership sets ----

pub async fn assign_member(
    State(state): State<AppState>,
    Path((name, member)): Path<(String, String)>,
) -> ServerResult<StatusCode> {
    let member = MemberId::parse(&member)?;
    state.kith.sets().assign(&name, member)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_member(
    State(state): State<AppState>,
    Path((name, member)): Path<(String, String)>,
) -> ServerResult<Json<Value>> {
    let member = MemberId::parse(&member)?;
    let removed = state.kith.sets().remove(&name, &member)?;
    Ok(Json(json!({ "removed": removed })))
}

pub async fn list_members(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ServerResult<Json<SetMembers>> {
    let members = state.kith.sets().members(&name)?;
    Ok(Json(SetMembers { name, members }))
}

// ---- Recommendations ----

pub async fn compute_recommendations(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Json(req): Json<ComputeRequest>,
) -> ServerResult<Json<PageResponse>> {
    let page_size = state.recommend.page_size(req.page_size)?;
    let items = state
        .kith
        .recommendations()
        .compute(viewer, &req.a, &req.b, page_size)?;
    page_response(&state, &viewer, items)
}

pub async fn next_recommendations(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Query(query): Query<PageQuery>,
) -> ServerResult<Json<PageResponse>> {
    let page_size = state.recommend.page_size(query.page_size)?;
    let items = state.kith.recommendations().next_page(&viewer, page_size)?;
    page_response(&state, &viewer, items)
}

fn page_response(
    state: &AppState,
    viewer: &MemberId,
    items: Vec<MemberId>,
) -> ServerResult<Json<PageResponse>> {
    let remaining = state
        .kith
        .recommendations()
        .state(viewer)?
        .map_or(0, |s| s.remaining());
    Ok(Json(PageResponse { items, remaining }))
}

// ---- Feeds ----

pub async fn create_feed(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
) -> ServerResult<(StatusCode, Json<Feed>)> {
    let feed = state.kith.feeds().create(viewer)?;
    Ok((StatusCode::CREATED, Json(feed)))
}

pub async fn rebuild_feed(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Json(req): Json<RebuildRequest>,
) -> ServerResult<Json<Feed>> {
    let feed = match (req.population, req.group) {
        (Some(_), Some(_)) => {
            return Err(ServerError::InvalidRequest(
                "population and group are mutually exclusive".into(),
            ))
        }
        (Some(population), None) => state.kith.feeds().rebuild(&viewer, &population)?,
        (None, group) => state.kith.generate_feed(&viewer, group.as_ref())?,
    };
    Ok(Json(feed))
}

pub async fn get_feed(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
) -> ServerResult<Json<Feed>> {
    Ok(Json(state.kith.feed(&viewer)?))
}

pub async fn clear_feed(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
) -> ServerResult<Json<Feed>> {
    Ok(Json(state.kith.clear_feed(&viewer)?))
}
