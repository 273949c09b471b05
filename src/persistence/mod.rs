//! Persistence layer: the storage seam every service talks to.
//!
//! [`GatewayStore`] covers every table read and write the gateway makes.
//! [`PostgresStore`] is the production implementation over `sqlx::PgPool`;
//! [`MemoryStore`] keeps rows in process memory for tests and for running
//! without a database.

pub mod memory;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;

use crate::domain::{
    Integration, NewPoll, NewWebhook, PerformanceMetrics, Poll, PollId, ViewLogEntry, VoteRecord,
    Webhook, WebhookId,
};
use crate::error::GatewayError;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Table operations backing the gateway's handlers.
///
/// Implementations perform no coordination between concurrent callers
/// beyond what the underlying storage provides.
#[async_trait]
pub trait GatewayStore: Send + Sync + fmt::Debug {
    /// Short name of the backend, reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] when the backend is unreachable.
    async fn ping(&self) -> Result<(), GatewayError>;

    /// Fetches one poll joined with its advanced-config and fraud-settings
    /// sub-records.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] on storage failure.
    async fn find_poll(&self, id: PollId) -> Result<Option<Poll>, GatewayError>;

    /// Fetches a page of polls, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] on storage failure.
    async fn list_polls(&self, limit: u32, offset: u32) -> Result<Vec<Poll>, GatewayError>;

    /// Counts every stored poll.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] on storage failure.
    async fn count_polls(&self) -> Result<u64, GatewayError>;

    /// Inserts a poll and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] on storage failure.
    async fn insert_poll(&self, poll: NewPoll) -> Result<Poll, GatewayError>;

    /// Runs the `calculate_poll_performance_metrics` aggregation.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] on storage failure.
    async fn performance_metrics(
        &self,
        poll_id: PollId,
    ) -> Result<PerformanceMetrics, GatewayError>;

    /// Fetches every vote row for a poll.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] on storage failure.
    async fn list_votes(&self, poll_id: PollId) -> Result<Vec<VoteRecord>, GatewayError>;

    /// Fetches every view-log row for a poll.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] on storage failure.
    async fn list_views(&self, poll_id: PollId) -> Result<Vec<ViewLogEntry>, GatewayError>;

    /// Fetches every webhook registration, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] on storage failure.
    async fn list_webhooks(&self) -> Result<Vec<Webhook>, GatewayError>;

    /// Inserts a webhook registration and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] on storage failure.
    async fn insert_webhook(&self, webhook: NewWebhook) -> Result<Webhook, GatewayError>;

    /// Deletes a webhook registration, returning the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] on storage failure.
    async fn delete_webhook(&self, id: WebhookId) -> Result<u64, GatewayError>;

    /// Inserts a configured integration and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] on storage failure.
    async fn insert_integration(
        &self,
        integration: Integration,
    ) -> Result<Integration, GatewayError>;
}
