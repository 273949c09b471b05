//! System endpoints: health check and the OpenAPI document.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::api::openapi::ApiDoc;
use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the store does not answer.
    pub status: &'static str,
    /// Current server time (RFC 3339).
    pub timestamp: String,
    /// Crate version.
    pub version: &'static str,
    /// Storage backend name.
    pub storage: &'static str,
}

/// `GET /health`: Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service status, version, storage backend and current timestamp.",
    responses(
        (status = 200, description = "Service status", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let status = match state.store.ping().await {
        Ok(()) => "healthy",
        Err(err) => {
            tracing::warn!(error = %err, "storage ping failed");
            "degraded"
        }
    };
    (
        StatusCode::OK,
        Json(HealthResponse {
            status,
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
            storage: state.store.backend(),
        }),
    )
}

/// `GET /openapi.json`: Generated OpenAPI document.
pub async fn openapi_handler() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
