//! HTTP handlers: decode, delegate, encode.

use crate::SERVICE_NAME;
use crate::dto::{ProcessErrorResponse, ProcessTextRequest, ProcessTextResponse};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use textgate_core::{Outcome, RequestError};
use tracing::{debug, error};

/// `POST /api/process` - forward text to the provider, bounded by the
/// request timeout.
///
/// The body is parsed by hand from [`Bytes`] so malformed JSON maps to
/// a plain 400 instead of the extractor's rejection codes.
pub async fn process_text(State(state): State<AppState>, body: Bytes) -> Response {
    let request: ProcessTextRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            debug!(error = %err, "rejecting unparseable body");
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": format!("invalid request body: {err}") })),
            )
                .into_response();
        }
    };

    let outcome = match state.coordinator.handle(&request.text).await {
        Ok(outcome) => outcome,
        Err(RequestError::EmptyInput) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": RequestError::EmptyInput.to_string() })),
            )
                .into_response();
        }
    };

    debug!(request_id = %outcome.id(), "request resolved");
    match outcome {
        Outcome::Success(completion) => {
            (StatusCode::OK, Json(ProcessTextResponse::from(completion))).into_response()
        }
        Outcome::Error { id, message } => {
            error!(request_id = %id, error = %message, "request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ProcessErrorResponse::new(id, message, "error")),
            )
                .into_response()
        }
        Outcome::Timeout { id } => (
            StatusCode::REQUEST_TIMEOUT,
            Json(ProcessErrorResponse::new(
                id,
                "timeout: the request took too long".to_owned(),
                "timeout",
            )),
        )
            .into_response(),
    }
}

/// `GET /health`.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
    }))
}
