//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::GatewayStore;
use crate::service::{AnalyticsService, IntegrationService, PollService, WebhookService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Storage backend shared by every service.
    pub store: Arc<dyn GatewayStore>,
    /// Poll reads and writes.
    pub polls: Arc<PollService>,
    /// Analytics report assembly.
    pub analytics: Arc<AnalyticsService>,
    /// Webhook registrations.
    pub webhooks: Arc<WebhookService>,
    /// Integration catalog and configuration.
    pub integrations: Arc<IntegrationService>,
    /// Normalized prefix resource paths must sit below; empty for any path.
    pub base_path: Arc<str>,
}

impl AppState {
    /// Builds every service over `store`, dispatching resources on any path.
    pub fn new(store: Arc<dyn GatewayStore>) -> Self {
        Self {
            polls: Arc::new(PollService::new(Arc::clone(&store))),
            analytics: Arc::new(AnalyticsService::new(Arc::clone(&store))),
            webhooks: Arc::new(WebhookService::new(Arc::clone(&store))),
            integrations: Arc::new(IntegrationService::new(Arc::clone(&store))),
            store,
            base_path: Arc::from(""),
        }
    }

    /// Restricts resource dispatch to paths below `base_path`, which must already be
    /// normalized by [`crate::config::normalize_base_path`].
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<Arc<str>>) -> Self {
        self.base_path = base_path.into();
        self
    }
}
