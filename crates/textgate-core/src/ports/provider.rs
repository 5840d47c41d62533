//! Text provider port.
//!
//! Abstraction over a remote text-generation backend. The concrete
//! backend (Groq, OpenAI, ...) is chosen once at startup and held as an
//! immutable trait object; request-handling code never branches on the
//! provider identity.

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors that can occur while generating text through a provider.
///
/// Implementations map their transport library's errors into these
/// variants so the core stays free of HTTP-client types.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key was configured for the selected provider. Surfaced
    /// before any network call is attempted.
    #[error("API key is not configured")]
    MissingApiKey,

    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The provider answered successfully but with no choices.
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// Connection, serialization, or decoding failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The cancellation token fired while the call was in flight.
    #[error("request cancelled")]
    Cancelled,
}

/// Port for remote text-generation backends.
///
/// Implementations must be cheap to share: the underlying network
/// client is constructed once and used concurrently by every worker.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a reply for a single-turn user message.
    ///
    /// The call must abort promptly when `cancel` fires, returning
    /// [`ProviderError::Cancelled`]; callers stop listening for the
    /// result once their own deadline passes.
    async fn generate(&self, text: &str, cancel: &CancellationToken)
    -> Result<String, ProviderError>;
}
