//! Axum HTTP adapter for textgate.
//!
//! Thin transport layer: decode the inbound call, hand it to the
//! coordinator, encode the outcome. All queueing, timeout, and provider
//! behavior lives in `textgate-core`.

pub mod dto;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "textgate";
