//! REST endpoint handlers organized by resource.

pub mod analytics;
pub mod docs;
pub mod integrations;
pub mod polls;
pub mod system;
pub mod webhooks;

use axum::Router;
use axum::routing::get;

use crate::app_state::AppState;

/// System routes mounted at the root level (not under the base path).
pub fn system_routes() -> Router<AppState> {
    let router = Router::new().route("/health", get(system::health_handler));

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/openapi.json", <super::openapi::ApiDoc as utoipa::OpenApi>::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route("/openapi.json", get(system::openapi_handler));

    router
}
