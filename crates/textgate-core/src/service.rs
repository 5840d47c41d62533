//! Per-request orchestration.
//!
//! The [`RequestCoordinator`] turns one inbound text into one bounded
//! outcome: it allocates the request identity, derives the cancellation
//! context, submits to the dispatcher, and races the result, error, and
//! deadline. Rejected submissions are run directly as an overflow valve
//! rather than dropped, so backpressure degrades to best-effort instead
//! of refusing service.

use crate::dispatch::{Dispatcher, WorkItem};
use crate::domain::Outcome;
use crate::ports::{ProviderError, TextProvider};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Default bound on one request, end to end.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Tunables for the coordinator. Only the per-request timeout so far;
/// tests inject a short one.
#[derive(Debug, Clone, Copy)]
pub struct CoordinatorConfig {
    /// Hard bound on a single request, regardless of provider behavior.
    pub timeout: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Client-input errors, rejected before anything reaches the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The `text` field was empty.
    #[error("text must not be empty")]
    EmptyInput,
}

/// Orchestrates one request through the dispatcher to an [`Outcome`].
pub struct RequestCoordinator {
    dispatcher: Arc<Dispatcher>,
    provider: Arc<dyn TextProvider>,
    timeout: Duration,
}

impl RequestCoordinator {
    /// The provider here is the same instance the dispatcher's workers
    /// hold; the coordinator only invokes it on the overflow path.
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        provider: Arc<dyn TextProvider>,
        config: CoordinatorConfig,
    ) -> Self {
        Self {
            dispatcher,
            provider,
            timeout: config.timeout,
        }
    }

    /// Resolve one inbound text to exactly one outcome.
    ///
    /// # Errors
    ///
    /// [`RequestError::EmptyInput`] for empty text; everything else is a
    /// regular [`Outcome`], including provider failures and timeouts.
    pub async fn handle(&self, text: &str) -> Result<Outcome, RequestError> {
        if text.is_empty() {
            return Err(RequestError::EmptyInput);
        }

        let cancel = CancellationToken::new();
        // Cancels the token when this future is dropped or returns, so
        // an in-flight provider call stops once nobody wants the answer.
        let _abandon_guard = cancel.clone().drop_guard();
        let deadline = Instant::now() + self.timeout;

        let (item, mut result_rx, mut error_rx) =
            WorkItem::new(text.to_owned(), cancel, deadline);
        let id = item.id.clone();

        if let Err(rejected) = self.dispatcher.submit(item) {
            // Overflow valve: the pool refused admission, so this one
            // request runs outside the worker bound instead of failing.
            tracing::warn!(
                request_id = %id,
                reason = %rejected,
                "queue rejected request, processing directly"
            );
            let provider = Arc::clone(&self.provider);
            let item = rejected.into_item();
            tokio::spawn(async move {
                process_item(provider.as_ref(), item).await;
            });
        }

        // Three-way race; whichever fires first is the outcome and any
        // late write to a sink is dropped by its bounded buffer.
        let outcome = tokio::select! {
            Some(completion) = result_rx.recv() => Outcome::Success(completion),
            Some(err) = error_rx.recv() => match err {
                // The processing step reports Cancelled when the
                // request's own deadline or cancel signal cut it short;
                // that is this request timing out, not a provider
                // failure, even if the error sink wins the race against
                // the deadline branch below.
                ProviderError::Cancelled => {
                    tracing::warn!(request_id = %id, "request timed out");
                    Outcome::Timeout { id }
                }
                err => Outcome::Error {
                    id,
                    message: format!("processing failed: {err}"),
                },
            },
            () = tokio::time::sleep_until(deadline) => {
                tracing::warn!(request_id = %id, "request timed out");
                Outcome::Timeout { id }
            }
        };
        Ok(outcome)
    }
}

/// The processing step: the one place a provider is invoked for an
/// admitted item. Called inline by workers and, for rejected items, from
/// the coordinator's overflow task.
pub(crate) async fn process_item(provider: &dyn TextProvider, item: WorkItem) {
    let result = tokio::select! {
        result = provider.generate(&item.text, &item.cancel) => result,
        () = tokio::time::sleep_until(item.deadline) => Err(ProviderError::Cancelled),
    };

    match result {
        Ok(response) => item.succeed(response),
        Err(err) => {
            tracing::debug!(request_id = %item.id, error = %err, "provider call failed");
            item.fail(err);
        }
    }
}
