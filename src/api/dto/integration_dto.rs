//! Integration DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Integration, IntegrationDescriptor};

/// Request body for `POST /integrations`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateIntegrationRequest {
    /// Integration type key (e.g. `"slack"`).
    #[serde(default)]
    pub integration: Option<String>,
    /// Opaque configuration; defaults to `{}`.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub config: Option<serde_json::Value>,
}

/// Response for `POST /integrations`.
#[derive(Debug, Serialize, ToSchema)]
pub struct IntegrationResponse {
    /// The stored row.
    pub integration: Integration,
}

/// Response for `GET /integrations`.
#[derive(Debug, Serialize, ToSchema)]
pub struct IntegrationCatalogResponse {
    /// Supported integration types. Not read from storage.
    pub integrations: Vec<IntegrationDescriptor>,
}
