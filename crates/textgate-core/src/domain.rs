//! Domain types shared across the core and its adapters.

use serde::Serialize;

/// Result of one successfully processed request.
#[derive(Debug, Clone, Serialize)]
pub struct Completion {
    /// Request identity assigned at submission.
    pub id: String,
    /// Original input text, unchanged.
    pub text: String,
    /// Text generated by the provider.
    pub response: String,
}

/// Final state of a handled request.
///
/// Every request the coordinator accepts resolves to exactly one of
/// these; it is never left pending past its deadline.
#[derive(Debug)]
pub enum Outcome {
    /// The provider produced a reply within the deadline.
    Success(Completion),
    /// Processing failed; the message is opaque provider/processing detail.
    Error { id: String, message: String },
    /// The deadline elapsed (or the caller went away) first. Any
    /// later-arriving provider result is discarded.
    Timeout { id: String },
}

impl Outcome {
    /// Request identity, regardless of how the request ended.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Success(completion) => &completion.id,
            Self::Error { id, .. } | Self::Timeout { id } => id,
        }
    }
}
