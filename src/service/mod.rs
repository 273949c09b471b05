//! Service layer: business logic orchestration.
//!
//! Each service receives the [`crate::persistence::GatewayStore`] it works
//! against at construction time; none of them hold state of their own.

pub mod analytics_service;
pub mod integration_service;
pub mod poll_service;
pub mod webhook_service;

pub use analytics_service::AnalyticsService;
pub use integration_service::IntegrationService;
pub use poll_service::{PollPage, PollService};
pub use webhook_service::WebhookService;
