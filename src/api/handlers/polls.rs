//! Poll handlers: fetch one, list a page, create.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::dto::{CreatePollRequest, PollListResponse, PollQuery, PollResponse};
use crate::api::extract::{ApiJson, ApiQuery, non_blank};
use crate::app_state::AppState;
use crate::domain::{NewPoll, PollId};
use crate::error::{ErrorResponse, GatewayError};
use crate::service::poll_service::DEFAULT_LIMIT;

/// `GET /polls`: One poll by `id`, or a page of polls.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] for a malformed id,
/// [`GatewayError::PollNotFound`] when no row matches, or a persistence
/// error.
#[utoipa::path(
    get,
    path = "/polls",
    tag = "Polls",
    summary = "Get or list polls",
    description = "With `id`, returns that poll joined with its advanced config and fraud settings. Without it, returns a page ordered by creation time, newest first. `total` is the page length; `total_count` is the number of stored polls.",
    params(PollQuery),
    responses(
        (status = 200, description = "Page of polls, or `{poll}` when `id` is given", body = PollListResponse),
        (status = 400, description = "Malformed query", body = ErrorResponse),
        (status = 404, description = "Poll not found", body = ErrorResponse),
    )
)]
pub async fn get_polls(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PollQuery>,
) -> Result<Response, GatewayError> {
    if let Some(raw) = non_blank(query.id) {
        let id: PollId = raw
            .parse()
            .map_err(|_| GatewayError::invalid(format!("invalid poll id: {raw}")))?;
        let poll = state.polls.get_poll(id).await?;
        return Ok(Json(PollResponse { poll }).into_response());
    }

    let page = state
        .polls
        .list_polls(
            query.limit.unwrap_or(DEFAULT_LIMIT),
            query.offset.unwrap_or(0),
        )
        .await?;

    Ok(Json(PollListResponse {
        polls: page.polls,
        total: page.total,
        total_count: page.total_count,
    })
    .into_response())
}

/// `POST /polls`: Create a poll.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when `poll` is missing or not
/// an object, or a persistence error.
#[utoipa::path(
    post,
    path = "/polls",
    tag = "Polls",
    summary = "Create a poll",
    description = "Stores the `poll` object as submitted and returns the inserted row.",
    request_body = CreatePollRequest,
    responses(
        (status = 201, description = "Poll created", body = PollResponse),
        (status = 400, description = "Missing or malformed poll", body = ErrorResponse),
    )
)]
pub async fn create_poll(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreatePollRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let new_poll = NewPoll::from_value(req.poll)?;
    let poll = state.polls.create_poll(new_poll).await?;
    Ok((StatusCode::CREATED, Json(PollResponse { poll })))
}
