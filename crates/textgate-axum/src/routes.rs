//! Route definitions and router construction.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};

/// Build the gateway router. Methods other than the ones routed here
/// get axum's automatic 405.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/process", post(handlers::process_text))
        .route("/health", get(handlers::health))
        .with_state(state)
}
