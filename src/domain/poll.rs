//! Poll rows and the read-only vote/view records used for analytics.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::PollId;
use crate::error::GatewayError;

/// Keys owned by the server; stripped from client-submitted payloads so
/// they cannot shadow the row's own columns when serialized flat.
const RESERVED_KEYS: [&str; 4] = ["id", "created_at", "advanced_config", "fraud_settings"];

/// A stored poll.
///
/// Serialized flat: the client payload's keys sit next to `id` and
/// `created_at`. The one-to-one sub-records are only present on
/// single-poll reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Poll {
    /// Row identifier.
    pub id: PollId,
    /// Configuration payload exactly as submitted.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Joined advanced-configuration sub-record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced_config: Option<Value>,
    /// Joined fraud-settings sub-record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraud_settings: Option<Value>,
}

/// Validated payload for a poll insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPoll {
    /// Client payload with server-managed keys removed.
    pub payload: Map<String, Value>,
}

impl NewPoll {
    /// Builds an insert payload from the request body's `poll` field.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] when the value is missing
    /// or is not a JSON object.
    pub fn from_value(value: Option<Value>) -> Result<Self, GatewayError> {
        let Some(Value::Object(mut payload)) = value else {
            return Err(GatewayError::invalid("poll object is required"));
        };
        for key in RESERVED_KEYS {
            payload.remove(key);
        }
        Ok(Self { payload })
    }
}

/// One respondent's choice on a poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoteRecord {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Poll voted on.
    pub poll_id: PollId,
    /// Index of the chosen option.
    pub option_index: i32,
    /// Respondent, when authenticated.
    pub user_id: Option<String>,
    /// Vote timestamp.
    pub created_at: DateTime<Utc>,
}

/// A single page view of a poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewLogEntry {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Poll viewed.
    pub poll_id: PollId,
    /// Viewer, when known.
    pub viewer_id: Option<String>,
    /// View timestamp.
    pub created_at: DateTime<Utc>,
}

/// Summary metrics computed by `calculate_poll_performance_metrics`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    /// Number of vote rows.
    pub total_votes: i64,
    /// Number of view-log rows.
    pub total_views: i64,
    /// Distinct authenticated voters.
    pub unique_voters: i64,
    /// Votes per hundred views (0 without views).
    pub engagement_rate: f64,
}

impl PerformanceMetrics {
    /// Computes the metrics from raw rows, mirroring the stored procedure.
    #[must_use]
    pub fn from_rows(votes: &[VoteRecord], views: &[ViewLogEntry]) -> Self {
        let mut voters: Vec<&str> = votes.iter().filter_map(|v| v.user_id.as_deref()).collect();
        voters.sort_unstable();
        voters.dedup();

        let total_votes = i64::try_from(votes.len()).unwrap_or(i64::MAX);
        let total_views = i64::try_from(views.len()).unwrap_or(i64::MAX);
        let unique_voters = i64::try_from(voters.len()).unwrap_or(i64::MAX);

        #[allow(clippy::cast_precision_loss)]
        let engagement_rate = if total_views == 0 {
            0.0
        } else {
            let rate = total_votes as f64 / total_views as f64 * 100.0;
            (rate * 100.0).round() / 100.0
        };

        Self {
            total_votes,
            total_views,
            unique_voters,
            engagement_rate,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vote(poll_id: PollId, user: Option<&str>) -> VoteRecord {
        VoteRecord {
            id: uuid::Uuid::new_v4(),
            poll_id,
            option_index: 0,
            user_id: user.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    fn view(poll_id: PollId) -> ViewLogEntry {
        ViewLogEntry {
            id: uuid::Uuid::new_v4(),
            poll_id,
            viewer_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn new_poll_requires_an_object() {
        assert!(NewPoll::from_value(None).is_err());
        assert!(NewPoll::from_value(Some(json!("title"))).is_err());
        assert!(NewPoll::from_value(Some(json!([1, 2]))).is_err());
    }

    #[test]
    fn new_poll_strips_server_keys() {
        let Ok(new_poll) = NewPoll::from_value(Some(json!({
            "id": "client-chosen",
            "created_at": "yesterday",
            "title": "Road repairs in Bamenda",
        }))) else {
            panic!("object payload should be accepted");
        };
        assert!(!new_poll.payload.contains_key("id"));
        assert!(!new_poll.payload.contains_key("created_at"));
        assert_eq!(
            new_poll.payload.get("title"),
            Some(&json!("Road repairs in Bamenda"))
        );
    }

    #[test]
    fn poll_serializes_flat() {
        let mut payload = Map::new();
        payload.insert("title".to_string(), json!("Water access"));
        let poll = Poll {
            id: PollId::new(),
            payload,
            created_at: Utc::now(),
            advanced_config: None,
            fraud_settings: Some(json!({"captcha": true})),
        };
        let value = serde_json::to_value(&poll).unwrap_or_default();
        assert_eq!(value.get("title"), Some(&json!("Water access")));
        assert!(value.get("advanced_config").is_none());
        assert_eq!(value.pointer("/fraud_settings/captcha"), Some(&json!(true)));
    }

    #[test]
    fn metrics_count_distinct_voters() {
        let poll_id = PollId::new();
        let votes = vec![
            vote(poll_id, Some("u1")),
            vote(poll_id, Some("u1")),
            vote(poll_id, Some("u2")),
            vote(poll_id, None),
        ];
        let views: Vec<ViewLogEntry> = (0..8).map(|_| view(poll_id)).collect();

        let metrics = PerformanceMetrics::from_rows(&votes, &views);
        assert_eq!(metrics.total_votes, 4);
        assert_eq!(metrics.total_views, 8);
        assert_eq!(metrics.unique_voters, 2);
        assert!((metrics.engagement_rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn metrics_without_views_have_zero_engagement() {
        let poll_id = PollId::new();
        let metrics = PerformanceMetrics::from_rows(&[vote(poll_id, None)], &[]);
        assert!(metrics.engagement_rate.abs() < f64::EPSILON);
    }
}
