//! Domain layer: row types, identifiers and the analytics report pieces.
//!
//! Everything here is storage-agnostic. Rows are read and written through
//! [`crate::persistence::GatewayStore`]; the gateway holds no state of
//! its own.

pub mod analytics;
pub mod ids;
pub mod integration;
pub mod poll;
pub mod webhook;

pub use analytics::{AnalyticsReport, DataQuality, Demographics, SegmentShare, TrendPoint};
pub use ids::{PollId, WebhookId};
pub use integration::{CATALOG, Integration, IntegrationDescriptor};
pub use poll::{NewPoll, PerformanceMetrics, Poll, ViewLogEntry, VoteRecord};
pub use webhook::{NewWebhook, Webhook, WebhookInput};
