//! REST API layer: route handlers, DTOs, and router composition.
//!
//! `/health` and the OpenAPI routes are explicit routes at the root. Every
//! other request goes through [`routes::dispatch`], which selects a resource
//! by the final path segment and otherwise answers with the documentation
//! document.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod openapi;
pub mod routes;

use std::any::Any;

use axum::Router;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderName, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::error::GatewayError;

/// Builds the complete application: routes, fallback, middleware and state.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(handlers::system_routes())
        .fallback(routes::dispatch)
        .layer(middleware::from_fn(answer_preflight))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Any origin, any method, and the headers browser clients send.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}

/// `OPTIONS` on any path gets an empty 200, whether or not the request
/// carries preflight headers. The CORS layer adds its headers on the way out.
async fn answer_preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return (StatusCode::OK, Body::empty()).into_response();
    }
    next.run(request).await
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "handler panicked".to_string()
    };
    GatewayError::Internal(detail).into_response()
}
