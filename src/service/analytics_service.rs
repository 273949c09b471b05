//! Analytics service: assembles the per-poll report.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::analytics::{placeholder_demographics, synthetic_trends};
use crate::domain::{AnalyticsReport, DataQuality, PollId};
use crate::error::GatewayError;
use crate::persistence::GatewayStore;

/// Builds [`AnalyticsReport`]s.
///
/// `overview` comes from the store's aggregation. `demographics` and
/// `trends` are placeholder and synthetic data respectively and are
/// labelled so in `data_quality`.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    store: Arc<dyn GatewayStore>,
}

impl AnalyticsService {
    /// Creates a new `AnalyticsService`.
    #[must_use]
    pub fn new(store: Arc<dyn GatewayStore>) -> Self {
        Self { store }
    }

    /// Builds the report for one poll.
    ///
    /// The poll is not required to exist; an unknown id yields zeroed
    /// metrics.
    ///
    /// # Errors
    ///
    /// Returns a persistence error on storage failure.
    pub async fn report(&self, poll_id: PollId) -> Result<AnalyticsReport, GatewayError> {
        let overview = self.store.performance_metrics(poll_id).await?;
        let votes = self.store.list_votes(poll_id).await?;
        let views = self.store.list_views(poll_id).await?;

        let generated_at = Utc::now();
        let trends = synthetic_trends(&mut rand::thread_rng(), generated_at.date_naive());

        tracing::debug!(
            %poll_id,
            votes = votes.len(),
            views = views.len(),
            "analytics report built"
        );

        Ok(AnalyticsReport {
            overview,
            demographics: placeholder_demographics(),
            trends,
            poll_id,
            generated_at,
            data_quality: DataQuality::new(votes.len(), views.len()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::analytics::TREND_DAYS;
    use crate::persistence::MemoryStore;

    #[tokio::test]
    async fn overview_reflects_stored_rows() {
        let store = Arc::new(MemoryStore::new());
        let poll_id = PollId::new();
        store.record_vote(poll_id, 0, Some("u1")).await;
        store.record_vote(poll_id, 1, Some("u2")).await;
        for _ in 0..4 {
            store.record_view(poll_id, None).await;
        }
        store.record_vote(PollId::new(), 0, Some("other")).await;

        let service = AnalyticsService::new(store);
        let Ok(report) = service.report(poll_id).await else {
            panic!("report failed");
        };
        assert_eq!(report.overview.total_votes, 2);
        assert_eq!(report.overview.total_views, 4);
        assert_eq!(report.data_quality.vote_sample_size, 2);
        assert_eq!(report.data_quality.view_sample_size, 4);
        assert_eq!(report.trends.len(), TREND_DAYS as usize);
    }

    #[tokio::test]
    async fn unknown_poll_gets_zeroed_overview() {
        let service = AnalyticsService::new(Arc::new(MemoryStore::new()));
        let Ok(report) = service.report(PollId::new()).await else {
            panic!("report failed");
        };
        assert_eq!(report.overview.total_votes, 0);
        assert_eq!(report.overview.total_views, 0);
    }
}
