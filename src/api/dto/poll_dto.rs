//! Poll DTOs for `GET /polls` and `POST /polls`.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Poll;

/// Query parameters for `GET /polls`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PollQuery {
    /// Fetch a single poll by UUID. A blank value is ignored.
    #[serde(default)]
    pub id: Option<String>,
    /// Page size (default 10, clamped to 1..=100).
    #[serde(default)]
    pub limit: Option<u32>,
    /// Rows to skip (default 0).
    #[serde(default)]
    pub offset: Option<u32>,
}

/// Request body for `POST /polls`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePollRequest {
    /// Poll configuration object, stored as submitted.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub poll: Option<serde_json::Value>,
}

/// Single-poll response (`GET /polls?id=` and `POST /polls`).
#[derive(Debug, Serialize, ToSchema)]
pub struct PollResponse {
    /// The poll row, flattened.
    #[schema(value_type = Object)]
    pub poll: Poll,
}

/// Page response for `GET /polls`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PollListResponse {
    /// Polls, newest first.
    #[schema(value_type = Vec<Object>)]
    pub polls: Vec<Poll>,
    /// Number of polls on this page (not the stored total).
    pub total: usize,
    /// Number of stored polls.
    pub total_count: u64,
}
