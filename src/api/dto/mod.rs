//! Data Transfer Objects for REST request/response serialization.
//!
//! Every request field is optional at the serde level so that missing
//! fields surface as the gateway's own validation messages rather than
//! deserializer errors.

pub mod analytics_dto;
pub mod integration_dto;
pub mod poll_dto;
pub mod webhook_dto;

pub use analytics_dto::*;
pub use integration_dto::*;
pub use poll_dto::*;
pub use webhook_dto::*;
