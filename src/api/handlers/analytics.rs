//! Analytics handler.

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::api::dto::AnalyticsParams;
use crate::api::extract::{ApiQuery, non_blank};
use crate::app_state::AppState;
use crate::domain::{AnalyticsReport, PollId};
use crate::error::{ErrorResponse, GatewayError};

/// `GET /analytics`: Performance report for one poll.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when `poll_id` is missing or
/// malformed (before any storage access), or a persistence error.
#[utoipa::path(
    get,
    path = "/analytics",
    tag = "Analytics",
    summary = "Poll analytics",
    description = "`overview` is computed by the database. `demographics` are fixed placeholder figures and `trends` are randomly generated; `dataQuality` labels each section accordingly.",
    params(AnalyticsParams),
    responses(
        (status = 200, description = "Analytics report", body = AnalyticsReport),
        (status = 400, description = "poll_id missing or malformed", body = ErrorResponse),
    )
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<AnalyticsParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let raw = non_blank(params.poll_id).ok_or_else(|| GatewayError::invalid("poll_id is required"))?;
    let poll_id: PollId = raw
        .parse()
        .map_err(|_| GatewayError::invalid(format!("invalid poll_id: {raw}")))?;

    let report = state.analytics.report(poll_id).await?;
    Ok(Json(report))
}
