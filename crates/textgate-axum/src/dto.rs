//! Request/response DTOs for the process endpoint.

use serde::{Deserialize, Serialize};
use textgate_core::Completion;

/// Body of `POST /api/process`.
#[derive(Debug, Deserialize)]
pub struct ProcessTextRequest {
    /// Text to forward to the provider.
    #[serde(default)]
    pub text: String,
}

/// Successful response body.
#[derive(Debug, Serialize)]
pub struct ProcessTextResponse {
    pub id: String,
    pub text: String,
    pub response: String,
    pub status: String,
}

impl From<Completion> for ProcessTextResponse {
    fn from(completion: Completion) -> Self {
        Self {
            id: completion.id,
            text: completion.text,
            response: completion.response,
            status: "success".to_owned(),
        }
    }
}

/// Error / timeout response body.
#[derive(Debug, Serialize)]
pub struct ProcessErrorResponse {
    pub id: String,
    pub error: String,
    pub status: String,
}

impl ProcessErrorResponse {
    #[must_use]
    pub fn new(id: String, error: String, status: &str) -> Self {
        Self {
            id,
            error,
            status: status.to_owned(),
        }
    }
}
