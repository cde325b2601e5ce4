use crate::upstream::UpstreamError;
use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Central error type for the Gateway application
#[derive(Debug, Error)]
pub enum AppError {
    /// Upstream failure on a JSON endpoint.
    #[error("Upstream error: {0}")]
    Upstream(#[source] UpstreamError),

    /// Upstream failure while rendering the dashboard page.
    #[error("Upstream error while rendering page: {0}")]
    UpstreamPage(#[source] UpstreamError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Upstream(_) => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "Failed to fetch upstream data" })),
            )
                .into_response(),
            AppError::UpstreamPage(_) => (
                StatusCode::BAD_GATEWAY,
                Html("<h1>Upstream fetch failed</h1>"),
            )
                .into_response(),
        }
    }
}
