//! Analytics DTOs.

use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for `GET /analytics`.
///
/// The date range and granularity are accepted for compatibility and have
/// no effect on the report.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyticsParams {
    /// Poll UUID (required).
    #[serde(default)]
    pub poll_id: Option<String>,
    /// Range start (ignored).
    #[serde(default)]
    pub start_date: Option<String>,
    /// Range end (ignored).
    #[serde(default)]
    pub end_date: Option<String>,
    /// Bucket size (ignored).
    #[serde(default)]
    pub granularity: Option<String>,
}
