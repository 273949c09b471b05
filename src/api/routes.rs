//! The gateway's route table.
//!
//! Every API resource is a variant of [`Endpoint`]. Requests are matched on
//! the final segment of their path, so `/polls` and
//! `/functions/v1/poll-api-gateway/polls` reach the same handlers. A
//! configured base path narrows this to paths below it.
//!
//! [`Endpoint::dispatch`] matches exhaustively on the variant, so an
//! endpoint cannot exist without handlers.

use axum::extract::{Request, State};
use axum::handler::Handler;
use axum::http::Method;
use axum::response::{IntoResponse, Response};

use super::handlers::{analytics, docs, integrations, polls, webhooks};
use crate::app_state::AppState;
use crate::error::GatewayError;

/// One endpoint group of the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `/polls`
    Polls,
    /// `/analytics`
    Analytics,
    /// `/webhooks`
    Webhooks,
    /// `/integrations`
    Integrations,
}

impl Endpoint {
    /// Every endpoint, in documentation order.
    pub const ALL: [Self; 4] = [
        Self::Polls,
        Self::Analytics,
        Self::Webhooks,
        Self::Integrations,
    ];

    /// Path segment that selects this endpoint.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Polls => "polls",
            Self::Analytics => "analytics",
            Self::Webhooks => "webhooks",
            Self::Integrations => "integrations",
        }
    }

    /// Route path relative to the base path.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Polls => "/polls",
            Self::Analytics => "/analytics",
            Self::Webhooks => "/webhooks",
            Self::Integrations => "/integrations",
        }
    }

    /// HTTP methods served.
    #[must_use]
    pub const fn methods(self) -> &'static [&'static str] {
        match self {
            Self::Polls | Self::Integrations => &["GET", "POST"],
            Self::Analytics => &["GET"],
            Self::Webhooks => &["GET", "POST", "DELETE"],
        }
    }

    /// Accepted query and body parameters, for the documentation document.
    #[must_use]
    pub const fn parameters(self) -> &'static [&'static str] {
        match self {
            Self::Polls => &["id", "limit", "offset", "poll (body)"],
            Self::Analytics => &["poll_id", "start_date", "end_date", "granularity"],
            Self::Webhooks => &["id (DELETE)", "webhook (body)"],
            Self::Integrations => &["integration (body)", "config (body)"],
        }
    }

    /// One-line description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Polls => "Create, fetch and list polls",
            Self::Analytics => "Performance metrics, demographics and trends for a poll",
            Self::Webhooks => "Register, list and delete webhooks",
            Self::Integrations => "List supported integrations and configure new ones",
        }
    }

    /// The endpoint selected by `path`, if any.
    ///
    /// With a non-empty `base_path` only paths strictly below it resolve.
    /// The final segment must equal [`Endpoint::segment`] exactly.
    #[must_use]
    pub fn resolve(base_path: &str, path: &str) -> Option<Self> {
        let scoped = if base_path.is_empty() {
            path
        } else {
            path.strip_prefix(base_path)
                .filter(|rest| rest.starts_with('/'))?
        };
        let segment = scoped.rsplit('/').next()?;
        Self::ALL.into_iter().find(|e| e.segment() == segment)
    }

    /// Runs the handler for the request's method; unlisted methods answer 405.
    pub async fn dispatch(self, request: Request, state: AppState) -> Response {
        let method = request.method().clone();
        match self {
            Self::Polls => {
                if method == Method::GET {
                    Handler::call(polls::get_polls, request, state).await
                } else if method == Method::POST {
                    Handler::call(polls::create_poll, request, state).await
                } else {
                    method_not_allowed()
                }
            }
            Self::Analytics => {
                if method == Method::GET {
                    Handler::call(analytics::get_analytics, request, state).await
                } else {
                    method_not_allowed()
                }
            }
            Self::Webhooks => {
                if method == Method::GET {
                    Handler::call(webhooks::list_webhooks, request, state).await
                } else if method == Method::POST {
                    Handler::call(webhooks::create_webhook, request, state).await
                } else if method == Method::DELETE {
                    Handler::call(webhooks::delete_webhook, request, state).await
                } else {
                    method_not_allowed()
                }
            }
            Self::Integrations => {
                if method == Method::GET {
                    Handler::call(integrations::list_integrations, request, state).await
                } else if method == Method::POST {
                    Handler::call(integrations::create_integration, request, state).await
                } else {
                    method_not_allowed()
                }
            }
        }
    }
}

fn method_not_allowed() -> Response {
    GatewayError::MethodNotAllowed.into_response()
}

/// Router fallback: resource dispatch by final path segment, or the
/// documentation document when no endpoint matches.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    match Endpoint::resolve(&state.base_path, request.uri().path()) {
        Some(endpoint) => {
            tracing::debug!(?endpoint, path = %request.uri().path(), "dispatching");
            endpoint.dispatch(request, state).await
        }
        None => docs::documentation(State(state)).await.into_response(),
    }
}
