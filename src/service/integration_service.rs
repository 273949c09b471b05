//! Integration service: static catalog and configured rows.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{CATALOG, Integration, IntegrationDescriptor};
use crate::error::GatewayError;
use crate::persistence::GatewayStore;

/// Serves the integration catalog and stores configured integrations.
///
/// [`IntegrationService::catalog`] never reads storage, so rows written by
/// [`IntegrationService::configure`] do not show up in it.
#[derive(Debug, Clone)]
pub struct IntegrationService {
    store: Arc<dyn GatewayStore>,
}

impl IntegrationService {
    /// Creates a new `IntegrationService`.
    #[must_use]
    pub fn new(store: Arc<dyn GatewayStore>) -> Self {
        Self { store }
    }

    /// The fixed catalog of supported integration types.
    #[must_use]
    pub fn catalog(&self) -> &'static [IntegrationDescriptor] {
        &CATALOG
    }

    /// Stores an active integration of the given type.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] when the type is missing or
    /// blank, or a persistence error.
    pub async fn configure(
        &self,
        integration_type: Option<String>,
        configuration: Option<Value>,
    ) -> Result<Integration, GatewayError> {
        let integration_type = integration_type
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| GatewayError::invalid("integration is required"))?;
        let configuration = configuration.unwrap_or_else(|| Value::Object(Default::default()));

        let row = Integration::new(integration_type, configuration);
        let stored = self.store.insert_integration(row).await?;
        tracing::info!(
            integration_id = %stored.id,
            integration_type = %stored.integration_type,
            "integration configured"
        );
        Ok(stored)
    }
}
