//! OpenAPI document for the gateway.
//!
//! Endpoint paths are relative to the configured base path.

use utoipa::OpenApi;

use super::handlers::{analytics, integrations, polls, system, webhooks};

/// Aggregated OpenAPI description of every annotated handler.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "CamerPulse Poll API Gateway",
        description = "REST API for polls, poll analytics, webhooks and integrations"
    ),
    paths(
        system::health_handler,
        polls::get_polls,
        polls::create_poll,
        analytics::get_analytics,
        webhooks::list_webhooks,
        webhooks::create_webhook,
        webhooks::delete_webhook,
        integrations::list_integrations,
        integrations::create_integration,
    ),
    components(schemas(crate::error::ErrorResponse, super::handlers::docs::ApiDocumentation)),
    tags(
        (name = "System", description = "Health and service metadata"),
        (name = "Polls", description = "Poll storage"),
        (name = "Analytics", description = "Per-poll analytics reports"),
        (name = "Webhooks", description = "Webhook registrations"),
        (name = "Integrations", description = "Third-party integrations"),
    )
)]
pub struct ApiDoc;
