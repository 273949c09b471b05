//! Static API documentation served for every unmatched path.

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::routes::Endpoint;
use crate::app_state::AppState;

/// One endpoint group as described to callers.
#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointDoc {
    /// Full path including the base path.
    pub path: String,
    /// Served methods.
    #[schema(value_type = Vec<String>)]
    pub methods: &'static [&'static str],
    /// Accepted parameters.
    #[schema(value_type = Vec<String>)]
    pub parameters: &'static [&'static str],
    /// What the endpoint does.
    pub description: &'static str,
}

/// The documentation document. Descriptive only: the authentication and
/// rate limit it states are not enforced by the gateway.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiDocumentation {
    /// API title.
    pub title: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Short description.
    pub description: &'static str,
    /// Prefix in front of every endpoint path.
    pub base_path: String,
    /// Expected authentication scheme.
    pub authentication: &'static str,
    /// Advertised request limit.
    pub rate_limit: &'static str,
    /// Endpoint groups.
    pub endpoints: Vec<EndpointDoc>,
}

impl ApiDocumentation {
    /// Builds the document for routes mounted under `base_path`.
    #[must_use]
    pub fn new(base_path: &str) -> Self {
        Self {
            title: "CamerPulse Poll API Gateway",
            version: env!("CARGO_PKG_VERSION"),
            description: "REST API for polls, poll analytics, webhooks and integrations",
            base_path: base_path.to_string(),
            authentication: "Bearer token in the Authorization header",
            rate_limit: "1000 requests per hour",
            endpoints: Endpoint::ALL
                .iter()
                .map(|endpoint| EndpointDoc {
                    path: format!("{base_path}{}", endpoint.path()),
                    methods: endpoint.methods(),
                    parameters: endpoint.parameters(),
                    description: endpoint.description(),
                })
                .collect(),
        }
    }
}

/// Fallback handler: any path without a route, any method.
pub async fn documentation(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiDocumentation::new(&state.base_path))
}
