//! Webhook registrations.
//!
//! Only registration, listing and deletion live here; nothing delivers
//! events to the registered URLs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::WebhookId;
use crate::error::GatewayError;

/// A stored webhook registration.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Webhook {
    /// Row identifier.
    pub id: WebhookId,
    /// Target URL.
    pub url: String,
    /// Subscribed event names (e.g. `"poll.created"`).
    pub events: Vec<String>,
    /// Shared secret, a UUID v4 generated once at creation.
    pub secret: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Whether the registration is active.
    pub is_active: bool,
    /// Free-form caller metadata.
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// The `webhook` object of a `POST /webhooks` body, before validation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct WebhookInput {
    /// Target URL (required, non-empty).
    #[serde(default)]
    pub url: Option<String>,
    /// Subscribed event names (required).
    #[serde(default)]
    pub events: Option<Vec<String>>,
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Defaults to `true`.
    #[serde(default)]
    pub is_active: Option<bool>,
    /// Free-form caller metadata.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
}

/// A validated registration ready to be stored.
///
/// The only way to build one is [`NewWebhook::register`], which is also
/// the only place a secret is generated. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWebhook {
    /// Target URL.
    pub url: String,
    /// Subscribed event names.
    pub events: Vec<String>,
    /// Freshly generated secret.
    pub secret: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Whether the registration is active.
    pub is_active: bool,
    /// Free-form caller metadata.
    pub metadata: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewWebhook {
    /// Validates the input and stamps it with a secret and a creation
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] when the input is absent,
    /// `url` is missing or blank, or `events` is missing.
    pub fn register(input: Option<WebhookInput>) -> Result<Self, GatewayError> {
        let input = input.unwrap_or_default();
        let (Some(url), Some(events)) = (input.url, input.events) else {
            return Err(GatewayError::invalid("url and events are required"));
        };
        if url.trim().is_empty() {
            return Err(GatewayError::invalid("url and events are required"));
        }

        Ok(Self {
            url,
            events,
            secret: generate_secret(),
            name: input.name,
            is_active: input.is_active.unwrap_or(true),
            metadata: input.metadata,
            created_at: Utc::now(),
        })
    }

    /// Converts the pending registration into the row stored under `id`.
    #[must_use]
    pub fn into_webhook(self, id: WebhookId) -> Webhook {
        Webhook {
            id,
            url: self.url,
            events: self.events,
            secret: self.secret,
            name: self.name,
            is_active: self.is_active,
            metadata: self.metadata,
            created_at: self.created_at,
        }
    }
}

/// Generates a webhook secret from the OS CSPRNG (UUID v4).
fn generate_secret() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn input(url: Option<&str>, events: Option<Vec<&str>>) -> WebhookInput {
        WebhookInput {
            url: url.map(str::to_string),
            events: events.map(|e| e.into_iter().map(str::to_string).collect()),
            ..WebhookInput::default()
        }
    }

    #[test]
    fn register_requires_url_and_events() {
        assert!(NewWebhook::register(None).is_err());
        assert!(NewWebhook::register(Some(input(None, Some(vec!["poll.created"])))).is_err());
        assert!(NewWebhook::register(Some(input(Some("https://example.com/hook"), None))).is_err());
        assert!(NewWebhook::register(Some(input(Some("  "), Some(vec!["poll.created"])))).is_err());
    }

    #[test]
    fn register_generates_uuid_secret() {
        let Ok(hook) = NewWebhook::register(Some(input(
            Some("https://example.com/hook"),
            Some(vec!["poll.created"]),
        ))) else {
            panic!("valid input should register");
        };
        assert!(uuid::Uuid::parse_str(&hook.secret).is_ok());
        assert!(hook.is_active);
    }

    #[test]
    fn secrets_are_never_reused() {
        let mut secrets: Vec<String> = (0..64).map(|_| generate_secret()).collect();
        secrets.sort();
        secrets.dedup();
        assert_eq!(secrets.len(), 64);
    }

    #[test]
    fn empty_event_list_is_accepted() {
        let result = NewWebhook::register(Some(input(Some("https://example.com/hook"), Some(vec![]))));
        assert!(result.is_ok());
    }
}
