//! PostgreSQL implementation of the persistence layer.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::GatewayStore;
use crate::config::GatewayConfig;
use crate::domain::{
    Integration, NewPoll, NewWebhook, PerformanceMetrics, Poll, PollId, ViewLogEntry, VoteRecord,
    Webhook, WebhookId,
};
use crate::error::GatewayError;

type WebhookRow = (
    Uuid,
    String,
    Vec<String>,
    String,
    Option<String>,
    bool,
    Option<Value>,
    DateTime<Utc>,
);

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized by the gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::Persistence`] if the database cannot be
    /// reached.
    pub async fn connect(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies the bundled migrations in `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::Persistence`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), GatewayError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| GatewayError::Persistence(e.to_string()))
    }
}

/// Page query for polls. `id` breaks ties between equal timestamps so that
/// consecutive pages never overlap.
const LIST_POLLS_SQL: &str = "SELECT id, payload, created_at FROM polls \
     ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2";

/// Converts a stored JSONB payload back into a key/value map.
///
/// The `polls.payload` column is constrained to objects, so anything else
/// indicates a corrupted row.
fn payload_map(id: Uuid, payload: Value) -> Result<Map<String, Value>, GatewayError> {
    match payload {
        Value::Object(map) => Ok(map),
        _ => Err(GatewayError::Internal(format!(
            "poll {id} payload is not a JSON object"
        ))),
    }
}

fn webhook_from_row(row: WebhookRow) -> Webhook {
    let (id, url, events, secret, name, is_active, metadata, created_at) = row;
    Webhook {
        id: WebhookId::from(id),
        url,
        events,
        secret,
        name,
        is_active,
        metadata,
        created_at,
    }
}

#[async_trait]
impl GatewayStore for PostgresStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_poll(&self, id: PollId) -> Result<Option<Poll>, GatewayError> {
        let row = sqlx::query_as::<_, (Uuid, Value, DateTime<Utc>, Option<Value>, Option<Value>)>(
            "SELECT p.id, p.payload, p.created_at, a.settings, f.settings \
             FROM polls p \
             LEFT JOIN poll_advanced_configs a ON a.poll_id = p.id \
             LEFT JOIN poll_fraud_settings f ON f.poll_id = p.id \
             WHERE p.id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some((id, payload, created_at, advanced_config, fraud_settings)) = row else {
            return Ok(None);
        };
        Ok(Some(Poll {
            id: PollId::from_uuid(id),
            payload: payload_map(id, payload)?,
            created_at,
            advanced_config,
            fraud_settings,
        }))
    }

    async fn list_polls(&self, limit: u32, offset: u32) -> Result<Vec<Poll>, GatewayError> {
        let rows = sqlx::query_as::<_, (Uuid, Value, DateTime<Utc>)>(LIST_POLLS_SQL)
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(id, payload, created_at)| {
                Ok(Poll {
                    id: PollId::from_uuid(id),
                    payload: payload_map(id, payload)?,
                    created_at,
                    advanced_config: None,
                    fraud_settings: None,
                })
            })
            .collect()
    }

    async fn count_polls(&self) -> Result<u64, GatewayError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM polls")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn insert_poll(&self, poll: NewPoll) -> Result<Poll, GatewayError> {
        let (id, payload, created_at) = sqlx::query_as::<_, (Uuid, Value, DateTime<Utc>)>(
            "INSERT INTO polls (payload) VALUES ($1) RETURNING id, payload, created_at",
        )
        .bind(Value::Object(poll.payload))
        .fetch_one(&self.pool)
        .await?;

        Ok(Poll {
            id: PollId::from_uuid(id),
            payload: payload_map(id, payload)?,
            created_at,
            advanced_config: None,
            fraud_settings: None,
        })
    }

    async fn performance_metrics(
        &self,
        poll_id: PollId,
    ) -> Result<PerformanceMetrics, GatewayError> {
        let (total_votes, total_views, unique_voters, engagement_rate) =
            sqlx::query_as::<_, (i64, i64, i64, f64)>(
                "SELECT total_votes, total_views, unique_voters, engagement_rate \
                 FROM calculate_poll_performance_metrics($1)",
            )
            .bind(poll_id.as_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(PerformanceMetrics {
            total_votes,
            total_views,
            unique_voters,
            engagement_rate,
        })
    }

    async fn list_votes(&self, poll_id: PollId) -> Result<Vec<VoteRecord>, GatewayError> {
        let rows = sqlx::query_as::<_, (Uuid, i32, Option<String>, DateTime<Utc>)>(
            "SELECT id, option_index, user_id, created_at FROM poll_votes WHERE poll_id = $1",
        )
        .bind(poll_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, option_index, user_id, created_at)| VoteRecord {
                id,
                poll_id,
                option_index,
                user_id,
                created_at,
            })
            .collect())
    }

    async fn list_views(&self, poll_id: PollId) -> Result<Vec<ViewLogEntry>, GatewayError> {
        let rows = sqlx::query_as::<_, (Uuid, Option<String>, DateTime<Utc>)>(
            "SELECT id, viewer_id, created_at FROM poll_view_logs WHERE poll_id = $1",
        )
        .bind(poll_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, viewer_id, created_at)| ViewLogEntry {
                id,
                poll_id,
                viewer_id,
                created_at,
            })
            .collect())
    }

    async fn list_webhooks(&self) -> Result<Vec<Webhook>, GatewayError> {
        let rows = sqlx::query_as::<_, WebhookRow>(
            "SELECT id, url, events, secret, name, is_active, metadata, created_at \
             FROM poll_webhooks ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(webhook_from_row).collect())
    }

    async fn insert_webhook(&self, webhook: NewWebhook) -> Result<Webhook, GatewayError> {
        let row = sqlx::query_as::<_, WebhookRow>(
            "INSERT INTO poll_webhooks (url, events, secret, name, is_active, metadata, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, url, events, secret, name, is_active, metadata, created_at",
        )
        .bind(&webhook.url)
        .bind(&webhook.events)
        .bind(&webhook.secret)
        .bind(&webhook.name)
        .bind(webhook.is_active)
        .bind(&webhook.metadata)
        .bind(webhook.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(webhook_from_row(row))
    }

    async fn delete_webhook(&self, id: WebhookId) -> Result<u64, GatewayError> {
        let result = sqlx::query("DELETE FROM poll_webhooks WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_integration(
        &self,
        integration: Integration,
    ) -> Result<Integration, GatewayError> {
        let (id, integration_type, configuration, is_active, created_at) =
            sqlx::query_as::<_, (Uuid, String, Value, bool, DateTime<Utc>)>(
                "INSERT INTO poll_integrations (id, integration_type, configuration, is_active, created_at) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING id, integration_type, configuration, is_active, created_at",
            )
            .bind(integration.id)
            .bind(&integration.integration_type)
            .bind(&integration.configuration)
            .bind(integration.is_active)
            .bind(integration.created_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(Integration {
            id,
            integration_type,
            configuration,
            is_active,
            created_at,
        })
    }
}
