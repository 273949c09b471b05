//! Poll service: single reads, paged listing and inserts.

use std::sync::Arc;

use crate::domain::{NewPoll, Poll, PollId};
use crate::error::GatewayError;
use crate::persistence::GatewayStore;

/// Default page size for `GET /polls`.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest accepted page size.
pub const MAX_LIMIT: u32 = 100;

/// One page of polls.
#[derive(Debug, Clone)]
pub struct PollPage {
    /// Polls on this page, newest first.
    pub polls: Vec<Poll>,
    /// Length of this page. Kept for compatibility with existing clients;
    /// it is not the number of stored polls.
    pub total: usize,
    /// Number of stored polls, from a separate count query.
    pub total_count: u64,
}

/// Orchestration for poll reads and writes.
#[derive(Debug, Clone)]
pub struct PollService {
    store: Arc<dyn GatewayStore>,
}

impl PollService {
    /// Creates a new `PollService`.
    #[must_use]
    pub fn new(store: Arc<dyn GatewayStore>) -> Self {
        Self { store }
    }

    /// Fetches one poll with its sub-records.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PollNotFound`] if no row matches, or a
    /// persistence error.
    pub async fn get_poll(&self, id: PollId) -> Result<Poll, GatewayError> {
        self.store
            .find_poll(id)
            .await?
            .ok_or(GatewayError::PollNotFound(*id.as_uuid()))
    }

    /// Fetches a page of polls. `limit` is clamped to `1..=MAX_LIMIT`.
    ///
    /// # Errors
    ///
    /// Returns a persistence error on storage failure.
    pub async fn list_polls(&self, limit: u32, offset: u32) -> Result<PollPage, GatewayError> {
        let limit = limit.clamp(1, MAX_LIMIT);
        let polls = self.store.list_polls(limit, offset).await?;
        let total_count = self.store.count_polls().await?;
        Ok(PollPage {
            total: polls.len(),
            polls,
            total_count,
        })
    }

    /// Inserts a poll.
    ///
    /// # Errors
    ///
    /// Returns a persistence error on storage failure.
    pub async fn create_poll(&self, poll: NewPoll) -> Result<Poll, GatewayError> {
        let created = self.store.insert_poll(poll).await?;
        tracing::info!(poll_id = %created.id, "poll created");
        Ok(created)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use serde_json::json;

    fn make_service() -> PollService {
        PollService::new(Arc::new(MemoryStore::new()))
    }

    async fn seed(service: &PollService, count: usize) {
        for i in 0..count {
            let Ok(poll) = NewPoll::from_value(Some(json!({ "title": format!("poll {i}") }))) else {
                panic!("valid payload");
            };
            if service.create_poll(poll).await.is_err() {
                panic!("insert failed");
            }
        }
    }

    #[tokio::test]
    async fn get_missing_poll_is_not_found() {
        let service = make_service();
        let result = service.get_poll(PollId::new()).await;
        assert!(matches!(result, Err(GatewayError::PollNotFound(_))));
    }

    #[tokio::test]
    async fn page_total_is_page_length() {
        let service = make_service();
        seed(&service, 5).await;

        let Ok(page) = service.list_polls(2, 0).await else {
            panic!("list failed");
        };
        assert_eq!(page.total, 2);
        assert_eq!(page.total_count, 5);
    }

    #[tokio::test]
    async fn limit_is_clamped() {
        let service = make_service();
        seed(&service, 3).await;

        let Ok(page) = service.list_polls(0, 0).await else {
            panic!("list failed");
        };
        assert_eq!(page.polls.len(), 1);
    }

    #[tokio::test]
    async fn offset_past_the_end_is_empty() {
        let service = make_service();
        seed(&service, 2).await;

        let Ok(page) = service.list_polls(10, 5).await else {
            panic!("list failed");
        };
        assert!(page.polls.is_empty());
        assert_eq!(page.total, 0);
    }
}
