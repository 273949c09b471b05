//! Webhook DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Webhook, WebhookInput};

/// Request body for `POST /webhooks`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWebhookRequest {
    /// Registration to create.
    #[serde(default)]
    pub webhook: Option<WebhookInput>,
}

/// Single-webhook response.
#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookResponse {
    /// The stored registration, including its secret.
    pub webhook: Webhook,
}

/// Response for `GET /webhooks`.
#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookListResponse {
    /// Every registration, newest first.
    pub webhooks: Vec<Webhook>,
}

/// Query parameters for `DELETE /webhooks`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteWebhookParams {
    /// Webhook UUID (required).
    #[serde(default)]
    pub id: Option<String>,
}

/// Response for `DELETE /webhooks`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteWebhookResponse {
    /// Always `true`; deletion does not report whether a row matched.
    pub success: bool,
}
