//! Shared application state for the HTTP adapter.

use std::sync::Arc;
use textgate_core::RequestCoordinator;

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Per-request orchestration entry point.
    pub coordinator: Arc<RequestCoordinator>,
}

impl AppState {
    #[must_use]
    pub fn new(coordinator: Arc<RequestCoordinator>) -> Self {
        Self { coordinator }
    }
}
