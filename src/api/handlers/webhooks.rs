//! Webhook registration handlers: list, create, delete.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::api::dto::{
    CreateWebhookRequest, DeleteWebhookParams, DeleteWebhookResponse, WebhookListResponse,
    WebhookResponse,
};
use crate::api::extract::{ApiJson, ApiQuery, non_blank};
use crate::app_state::AppState;
use crate::domain::WebhookId;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /webhooks`: List registrations.
///
/// # Errors
///
/// Returns a persistence error on storage failure.
#[utoipa::path(
    get,
    path = "/webhooks",
    tag = "Webhooks",
    summary = "List webhooks",
    responses(
        (status = 200, description = "All registrations", body = WebhookListResponse),
    )
)]
pub async fn list_webhooks(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    let webhooks = state.webhooks.list().await?;
    Ok(Json(WebhookListResponse { webhooks }))
}

/// `POST /webhooks`: Register a webhook.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when `url` or `events` is
/// missing, or a persistence error.
#[utoipa::path(
    post,
    path = "/webhooks",
    tag = "Webhooks",
    summary = "Register a webhook",
    description = "Generates the registration's secret once, at creation, and returns it with the stored row.",
    request_body = CreateWebhookRequest,
    responses(
        (status = 201, description = "Webhook registered", body = WebhookResponse),
        (status = 400, description = "url and events are required", body = ErrorResponse),
    )
)]
pub async fn create_webhook(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateWebhookRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let webhook = state.webhooks.register(req.webhook).await?;
    Ok((StatusCode::CREATED, Json(WebhookResponse { webhook })))
}

/// `DELETE /webhooks`: Remove a registration by `id`.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when `id` is missing or
/// malformed, or a persistence error.
#[utoipa::path(
    delete,
    path = "/webhooks",
    tag = "Webhooks",
    summary = "Delete a webhook",
    description = "Succeeds whether or not a registration with that id existed.",
    params(DeleteWebhookParams),
    responses(
        (status = 200, description = "Deleted (or already absent)", body = DeleteWebhookResponse),
        (status = 400, description = "id missing or malformed", body = ErrorResponse),
    )
)]
pub async fn delete_webhook(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<DeleteWebhookParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let raw = non_blank(params.id).ok_or_else(|| GatewayError::invalid("id is required"))?;
    let id: WebhookId = raw
        .parse()
        .map_err(|_| GatewayError::invalid(format!("invalid webhook id: {raw}")))?;

    state.webhooks.delete(id).await?;
    Ok(Json(DeleteWebhookResponse { success: true }))
}
