use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kith_sdk::KithError;
use kith_types::{ErrorKind, TypeError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Kith(#[from] KithError),

    #[error("missing x-kith-viewer header")]
    MissingViewer,

    #[error("invalid identifier: {0}")]
    InvalidId(#[from] TypeError),

    #[error("page size {requested} is outside 1..={max}")]
    PageSize { requested: usize, max: usize },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Kith(e) => e.kind(),
            Self::MissingViewer
            | Self::InvalidId(_)
            | Self::PageSize { .. }
            | Self::InvalidRequest(_) => ErrorKind::InvalidInput,
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Exhausted | ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::NotAllowed => StatusCode::FORBIDDEN,
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

macro_rules! via_kith {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ServerError {
            fn from(e: $ty) -> Self {
                Self::Kith(KithError::from(e))
            }
        })*
    };
}

via_kith!(
    kith_sets::SetError,
    kith_recommend::RecommendError,
    kith_feed::FeedError
);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        }
        let body = Json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }));
        (status, body).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
