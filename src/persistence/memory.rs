//! In-process implementation of [`GatewayStore`].
//!
//! Used by the test suites and when `PERSISTENCE_ENABLED=false`. Each
//! table is a `Vec` behind its own [`tokio::sync::RwLock`], kept in
//! insertion order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use super::GatewayStore;
use crate::domain::{
    Integration, NewPoll, NewWebhook, PerformanceMetrics, Poll, PollId, ViewLogEntry, VoteRecord,
    Webhook, WebhookId,
};
use crate::error::GatewayError;

/// Memory-backed store.
///
/// Besides the [`GatewayStore`] operations it exposes seeding helpers for
/// the read-only tables and an operation counter, so tests can assert
/// whether a request reached storage at all.
#[derive(Debug, Default)]
pub struct MemoryStore {
    polls: RwLock<Vec<Poll>>,
    advanced_configs: RwLock<HashMap<PollId, Value>>,
    fraud_settings: RwLock<HashMap<PollId, Value>>,
    votes: RwLock<Vec<VoteRecord>>,
    views: RwLock<Vec<ViewLogEntry>>,
    webhooks: RwLock<Vec<Webhook>>,
    integrations: RwLock<Vec<Integration>>,
    failure: RwLock<Option<String>>,
    operations: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of [`GatewayStore`] calls served so far.
    #[must_use]
    pub fn operation_count(&self) -> u64 {
        self.operations.load(Ordering::SeqCst)
    }

    /// Makes every subsequent [`GatewayStore`] call fail with `message`
    /// (or succeed again with `None`).
    pub async fn set_failure(&self, message: Option<String>) {
        *self.failure.write().await = message;
    }

    /// Attaches an advanced-config sub-record to a poll.
    pub async fn set_advanced_config(&self, poll_id: PollId, settings: Value) {
        self.advanced_configs.write().await.insert(poll_id, settings);
    }

    /// Attaches a fraud-settings sub-record to a poll.
    pub async fn set_fraud_settings(&self, poll_id: PollId, settings: Value) {
        self.fraud_settings.write().await.insert(poll_id, settings);
    }

    /// Records a vote for a poll.
    pub async fn record_vote(&self, poll_id: PollId, option_index: i32, user_id: Option<&str>) {
        self.votes.write().await.push(VoteRecord {
            id: uuid::Uuid::new_v4(),
            poll_id,
            option_index,
            user_id: user_id.map(str::to_string),
            created_at: Utc::now(),
        });
    }

    /// Records a page view for a poll.
    pub async fn record_view(&self, poll_id: PollId, viewer_id: Option<&str>) {
        self.views.write().await.push(ViewLogEntry {
            id: uuid::Uuid::new_v4(),
            poll_id,
            viewer_id: viewer_id.map(str::to_string),
            created_at: Utc::now(),
        });
    }

    /// Snapshot of every configured integration row.
    pub async fn integrations(&self) -> Vec<Integration> {
        self.integrations.read().await.clone()
    }

    /// Counts the call and applies any injected failure.
    async fn enter(&self) -> Result<(), GatewayError> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        match self.failure.read().await.as_ref() {
            Some(message) => Err(GatewayError::Persistence(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GatewayStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        self.enter().await
    }

    async fn find_poll(&self, id: PollId) -> Result<Option<Poll>, GatewayError> {
        self.enter().await?;
        let polls = self.polls.read().await;
        let Some(poll) = polls.iter().find(|p| p.id == id) else {
            return Ok(None);
        };
        let mut poll = poll.clone();
        poll.advanced_config = self.advanced_configs.read().await.get(&id).cloned();
        poll.fraud_settings = self.fraud_settings.read().await.get(&id).cloned();
        Ok(Some(poll))
    }

    async fn list_polls(&self, limit: u32, offset: u32) -> Result<Vec<Poll>, GatewayError> {
        self.enter().await?;
        let polls = self.polls.read().await;
        // Newest insert first among equal timestamps; the sort is stable.
        let mut newest_first: Vec<&Poll> = polls.iter().rev().collect();
        newest_first.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(newest_first
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count_polls(&self) -> Result<u64, GatewayError> {
        self.enter().await?;
        Ok(self.polls.read().await.len() as u64)
    }

    async fn insert_poll(&self, poll: NewPoll) -> Result<Poll, GatewayError> {
        self.enter().await?;
        let row = Poll {
            id: PollId::new(),
            payload: poll.payload,
            created_at: Utc::now(),
            advanced_config: None,
            fraud_settings: None,
        };
        self.polls.write().await.push(row.clone());
        Ok(row)
    }

    async fn performance_metrics(
        &self,
        poll_id: PollId,
    ) -> Result<PerformanceMetrics, GatewayError> {
        self.enter().await?;
        let votes: Vec<VoteRecord> = self
            .votes
            .read()
            .await
            .iter()
            .filter(|v| v.poll_id == poll_id)
            .cloned()
            .collect();
        let views: Vec<ViewLogEntry> = self
            .views
            .read()
            .await
            .iter()
            .filter(|v| v.poll_id == poll_id)
            .cloned()
            .collect();
        Ok(PerformanceMetrics::from_rows(&votes, &views))
    }

    async fn list_votes(&self, poll_id: PollId) -> Result<Vec<VoteRecord>, GatewayError> {
        self.enter().await?;
        Ok(self
            .votes
            .read()
            .await
            .iter()
            .filter(|v| v.poll_id == poll_id)
            .cloned()
            .collect())
    }

    async fn list_views(&self, poll_id: PollId) -> Result<Vec<ViewLogEntry>, GatewayError> {
        self.enter().await?;
        Ok(self
            .views
            .read()
            .await
            .iter()
            .filter(|v| v.poll_id == poll_id)
            .cloned()
            .collect())
    }

    async fn list_webhooks(&self) -> Result<Vec<Webhook>, GatewayError> {
        self.enter().await?;
        Ok(self.webhooks.read().await.iter().rev().cloned().collect())
    }

    async fn insert_webhook(&self, webhook: NewWebhook) -> Result<Webhook, GatewayError> {
        self.enter().await?;
        let row = webhook.into_webhook(WebhookId::new());
        self.webhooks.write().await.push(row.clone());
        Ok(row)
    }

    async fn delete_webhook(&self, id: WebhookId) -> Result<u64, GatewayError> {
        self.enter().await?;
        let mut webhooks = self.webhooks.write().await;
        let before = webhooks.len();
        webhooks.retain(|w| w.id != id);
        Ok((before - webhooks.len()) as u64)
    }

    async fn insert_integration(
        &self,
        integration: Integration,
    ) -> Result<Integration, GatewayError> {
        self.enter().await?;
        self.integrations.write().await.push(integration.clone());
        Ok(integration)
    }
}
