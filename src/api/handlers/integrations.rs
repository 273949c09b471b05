//! Integration handlers: catalog listing and configuration.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::api::dto::{CreateIntegrationRequest, IntegrationCatalogResponse, IntegrationResponse};
use crate::api::extract::ApiJson;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /integrations`: Supported integration types.
#[utoipa::path(
    get,
    path = "/integrations",
    tag = "Integrations",
    summary = "List supported integrations",
    description = "Returns the fixed catalog. Integrations created through POST are not listed here.",
    responses(
        (status = 200, description = "Integration catalog", body = IntegrationCatalogResponse),
    )
)]
pub async fn list_integrations(State(state): State<AppState>) -> impl IntoResponse {
    Json(IntegrationCatalogResponse {
        integrations: state.integrations.catalog().to_vec(),
    })
}

/// `POST /integrations`: Configure an integration.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when `integration` is missing,
/// or a persistence error.
#[utoipa::path(
    post,
    path = "/integrations",
    tag = "Integrations",
    summary = "Configure an integration",
    request_body = CreateIntegrationRequest,
    responses(
        (status = 201, description = "Integration stored", body = IntegrationResponse),
        (status = 400, description = "integration is required", body = ErrorResponse),
    )
)]
pub async fn create_integration(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateIntegrationRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let integration = state
        .integrations
        .configure(req.integration, req.config)
        .await?;
    Ok((StatusCode::CREATED, Json(IntegrationResponse { integration })))
}
