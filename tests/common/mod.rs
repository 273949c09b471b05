//! Shared helpers for the HTTP-level test suites.

#![allow(dead_code, clippy::panic)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use camerpulse_gateway::api::build_app;
use camerpulse_gateway::app_state::AppState;
use camerpulse_gateway::persistence::{GatewayStore, MemoryStore};

/// A gateway over a fresh in-memory store.
pub struct TestGateway {
    pub store: Arc<MemoryStore>,
    pub app: Router,
}

impl TestGateway {
    pub fn new() -> Self {
        Self::with_base_path("")
    }

    pub fn with_base_path(base_path: &str) -> Self {
        let store = Arc::new(MemoryStore::new());
        let shared: Arc<dyn GatewayStore> = Arc::<MemoryStore>::clone(&store);
        let state = AppState::new(shared).with_base_path(base_path);
        Self {
            store,
            app: build_app(state),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body.to_string())).await
    }

    pub async fn post_raw(&self, uri: &str, body: &str) -> TestResponse {
        self.send(Method::POST, uri, Some(body.to_string())).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<String>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(text) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(text)
            }
            None => Body::empty(),
        };
        let Ok(request) = builder.body(body) else {
            panic!("request should build");
        };
        let Ok(response) = self.app.clone().oneshot(request).await;
        let status = response.status();
        let headers = response.headers().clone();
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body should be readable");
        };
        TestResponse {
            status,
            headers,
            body: bytes.to_vec(),
        }
    }
}

/// Status, headers and raw body of one response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        let Ok(value) = serde_json::from_slice(&self.body) else {
            panic!(
                "body should be JSON: {}",
                String::from_utf8_lossy(&self.body)
            );
        };
        value
    }
}
