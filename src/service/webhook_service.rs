//! Webhook service: registration, listing and deletion.

use std::sync::Arc;

use crate::domain::{NewWebhook, Webhook, WebhookId, WebhookInput};
use crate::error::GatewayError;
use crate::persistence::GatewayStore;

/// Orchestration for webhook registrations.
#[derive(Debug, Clone)]
pub struct WebhookService {
    store: Arc<dyn GatewayStore>,
}

impl WebhookService {
    /// Creates a new `WebhookService`.
    #[must_use]
    pub fn new(store: Arc<dyn GatewayStore>) -> Self {
        Self { store }
    }

    /// Lists every registration.
    ///
    /// # Errors
    ///
    /// Returns a persistence error on storage failure.
    pub async fn list(&self) -> Result<Vec<Webhook>, GatewayError> {
        self.store.list_webhooks().await
    }

    /// Validates and stores a registration with a freshly generated secret.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] when `url` or `events` is
    /// missing (nothing is inserted), or a persistence error.
    pub async fn register(&self, input: Option<WebhookInput>) -> Result<Webhook, GatewayError> {
        let pending = NewWebhook::register(input)?;
        let webhook = self.store.insert_webhook(pending).await?;
        tracing::info!(webhook_id = %webhook.id, url = %webhook.url, "webhook registered");
        Ok(webhook)
    }

    /// Deletes a registration. Succeeds whether or not a row matched.
    ///
    /// # Errors
    ///
    /// Returns a persistence error on storage failure.
    pub async fn delete(&self, id: WebhookId) -> Result<(), GatewayError> {
        let removed = self.store.delete_webhook(id).await?;
        tracing::info!(webhook_id = %id, removed, "webhook deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn valid_input() -> WebhookInput {
        WebhookInput {
            url: Some("https://example.com/hook".to_string()),
            events: Some(vec!["poll.created".to_string()]),
            ..WebhookInput::default()
        }
    }

    #[tokio::test]
    async fn invalid_registration_does_not_touch_storage() {
        let store = Arc::new(MemoryStore::new());
        let service = WebhookService::new(Arc::clone(&store) as Arc<dyn GatewayStore>);

        let result = service
            .register(Some(WebhookInput {
                events: None,
                ..valid_input()
            }))
            .await;
        assert!(matches!(result, Err(GatewayError::InvalidRequest(_))));
        assert_eq!(store.operation_count(), 0);
    }

    #[tokio::test]
    async fn registered_webhooks_are_listed() {
        let service = WebhookService::new(Arc::new(MemoryStore::new()));
        let Ok(created) = service.register(Some(valid_input())).await else {
            panic!("registration failed");
        };

        let Ok(list) = service.list().await else {
            panic!("list failed");
        };
        assert_eq!(list.len(), 1);
        assert_eq!(list.first().map(|w| w.id), Some(created.id));
    }

    #[tokio::test]
    async fn deleting_unknown_id_succeeds() {
        let service = WebhookService::new(Arc::new(MemoryStore::new()));
        assert!(service.delete(WebhookId::new()).await.is_ok());
    }
}
