//! API error types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use nodequeue_store::StoreError;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Error from the priority store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Request body could not be decoded.
    #[error("invalid request body: {0}")]
    BadRequest(String),

    /// Path id is not an integer, so no node can match it.
    #[error("node {0} not found")]
    UnknownId(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Store(StoreError::InvalidArgument(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::UnknownId(_)
            | Self::Store(StoreError::NotFound(_))
            | Self::Store(StoreError::EmptyQueue) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), "Request failed: {}", message);
        } else {
            warn!(status = status.as_u16(), "Request rejected: {}", message);
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
