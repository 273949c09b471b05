//! Third-party integrations: the static catalog and configured rows.
//!
//! The catalog answers `GET /integrations`; configured rows are what
//! `POST /integrations` writes. The two are separate concepts and the
//! catalog never reflects stored rows.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Descriptor of a supported integration type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct IntegrationDescriptor {
    /// Stable type key, used as `integration` in POST bodies.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Catalog grouping.
    pub category: &'static str,
    /// Configuration keys the integration expects.
    #[schema(value_type = Vec<String>)]
    pub config_fields: &'static [&'static str],
}

/// Every integration type the gateway advertises.
pub const CATALOG: [IntegrationDescriptor; 4] = [
    IntegrationDescriptor {
        id: "slack",
        name: "Slack",
        description: "Post poll results and alerts to a Slack channel",
        category: "messaging",
        config_fields: &["webhook_url", "channel"],
    },
    IntegrationDescriptor {
        id: "microsoft_teams",
        name: "Microsoft Teams",
        description: "Share poll updates in a Microsoft Teams channel",
        category: "messaging",
        config_fields: &["webhook_url"],
    },
    IntegrationDescriptor {
        id: "zapier",
        name: "Zapier",
        description: "Trigger Zapier workflows from poll events",
        category: "automation",
        config_fields: &["hook_url"],
    },
    IntegrationDescriptor {
        id: "google_sheets",
        name: "Google Sheets",
        description: "Export votes to a Google Sheets spreadsheet",
        category: "export",
        config_fields: &["spreadsheet_id", "sheet_name"],
    },
];

/// A configured integration row.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Integration {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Integration type key as submitted.
    pub integration_type: String,
    /// Opaque configuration payload.
    #[schema(value_type = Object)]
    pub configuration: Value,
    /// Always `true` on insert.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Integration {
    /// Builds a fresh active row for insertion.
    #[must_use]
    pub fn new(integration_type: String, configuration: Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            integration_type,
            configuration,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
