//! # camerpulse-gateway
//!
//! REST gateway for the CamerPulse polling platform.
//!
//! The gateway exposes polls, per-poll analytics, webhook registrations and
//! third-party integrations over HTTP. Storage sits behind the
//! [`persistence::GatewayStore`] trait: PostgreSQL in production, an
//! in-memory store for tests and database-less runs.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── CORS / panic / trace middleware
//!     ├── REST Handlers (api/)
//!     │
//!     ├── Poll, Analytics, Webhook, Integration services (service/)
//!     │
//!     ├── GatewayStore (persistence/)
//!     │
//!     └── PostgreSQL or in-memory tables
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
