//! Bounded admission queue and worker pool.
//!
//! The [`Dispatcher`] owns a fixed-capacity channel of [`WorkItem`]s and
//! a fixed number of worker tasks draining it. Admission is strictly
//! non-blocking: a full buffer rejects the item immediately and hands it
//! back to the caller, which decides what to do with it (the coordinator
//! runs it directly as an overflow valve). The buffer bound is the
//! backpressure mechanism; a slow provider call ties up one worker, not
//! the queue.

use crate::domain::Completion;
use crate::ports::{ProviderError, TextProvider};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// One admitted unit of work.
///
/// Carries the input text, the request's cancellation context, and the
/// single-slot result/error sinks the coordinator is listening on. Over
/// the lifetime of an item exactly one sink receives exactly one value,
/// or neither does (the coordinator abandoned it on timeout).
#[derive(Debug)]
pub struct WorkItem {
    /// Request identity, assigned at construction, never reused.
    pub id: String,
    /// Input text, immutable once created.
    pub text: String,
    /// External cancel signal; fires when the caller goes away.
    pub cancel: CancellationToken,
    /// Hard bound on processing; checked at pickup and raced during the
    /// provider call.
    pub deadline: Instant,
    result_tx: mpsc::Sender<Completion>,
    error_tx: mpsc::Sender<ProviderError>,
}

impl WorkItem {
    /// Build a work item plus the receiving halves of its sinks.
    ///
    /// Sinks have capacity one per writer, so a late writer racing a
    /// departed reader drops its value instead of blocking.
    pub fn new(
        text: String,
        cancel: CancellationToken,
        deadline: Instant,
    ) -> (Self, mpsc::Receiver<Completion>, mpsc::Receiver<ProviderError>) {
        let (result_tx, result_rx) = mpsc::channel(1);
        let (error_tx, error_rx) = mpsc::channel(1);
        let item = Self {
            id: Uuid::new_v4().to_string(),
            text,
            cancel,
            deadline,
            result_tx,
            error_tx,
        };
        (item, result_rx, error_rx)
    }

    /// Whether the request stopped mattering before processing began.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.cancel.is_cancelled() || Instant::now() >= self.deadline
    }

    /// Finalize with a generated reply. First writer wins; if the slot
    /// is taken or the coordinator is gone, the value is dropped.
    pub fn succeed(self, response: String) {
        let completion = Completion {
            id: self.id.clone(),
            text: self.text.clone(),
            response,
        };
        if self.result_tx.try_send(completion).is_err() {
            tracing::trace!(request_id = %self.id, "result discarded, caller no longer listening");
        }
    }

    /// Finalize with an error. Same first-writer-wins semantics as
    /// [`Self::succeed`].
    pub fn fail(self, err: ProviderError) {
        if self.error_tx.try_send(err).is_err() {
            tracing::trace!(request_id = %self.id, "error discarded, caller no longer listening");
        }
    }
}

/// Rejection from [`Dispatcher::submit`]. Hands the item back so the
/// caller can run it outside the pool.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The admission buffer is at capacity.
    #[error("queue is full")]
    Full(WorkItem),
    /// The dispatcher has been shut down.
    #[error("queue is closed")]
    Closed(WorkItem),
}

impl SubmitError {
    /// Recover the rejected item.
    #[must_use]
    pub fn into_item(self) -> WorkItem {
        match self {
            Self::Full(item) | Self::Closed(item) => item,
        }
    }
}

/// Admission control and fan-out to a fixed pool of workers.
///
/// Process-wide: constructed once at startup and shut down explicitly
/// before exit. Shutdown stops admissions and waits for already-admitted
/// items to drain; it cancels nothing in flight.
pub struct Dispatcher {
    // `None` doubles as the closed flag: every mutation happens under
    // this lock, and dropping the sender closes the channel for writes.
    tx: Mutex<Option<mpsc::Sender<WorkItem>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl Dispatcher {
    /// Spawn `workers` worker tasks sharing one admission buffer of
    /// `capacity` items. The provider is the single downstream the
    /// workers invoke.
    ///
    /// # Panics
    ///
    /// `capacity` must be at least 1; the admission channel has no
    /// zero-slot mode.
    #[must_use]
    pub fn new(capacity: usize, workers: usize, provider: Arc<dyn TextProvider>) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        let rx = Arc::new(tokio::sync::Mutex::new(rx));

        let handles = (0..workers)
            .map(|worker_id| {
                tokio::spawn(worker_loop(worker_id, Arc::clone(&rx), Arc::clone(&provider)))
            })
            .collect();

        Self {
            tx: Mutex::new(Some(tx)),
            workers: Mutex::new(handles),
        }
    }

    /// Attempt a single non-blocking enqueue.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Full`] when the buffer is at capacity,
    /// [`SubmitError::Closed`] after [`Self::shutdown`]. Both return the
    /// item to the caller. Safe to call from any number of submitters.
    pub fn submit(&self, item: WorkItem) -> Result<(), SubmitError> {
        let guard = self.tx.lock().expect("dispatcher submit lock poisoned");
        match guard.as_ref() {
            None => Err(SubmitError::Closed(item)),
            Some(tx) => match tx.try_send(item) {
                Ok(()) => Ok(()),
                Err(TrySendError::Full(item)) => Err(SubmitError::Full(item)),
                Err(TrySendError::Closed(item)) => Err(SubmitError::Closed(item)),
            },
        }
    }

    /// Stop admissions and wait for every worker to drain and exit.
    ///
    /// Idempotent: subsequent calls observe the closed state and return
    /// immediately.
    pub async fn shutdown(&self) {
        let tx = self
            .tx
            .lock()
            .expect("dispatcher submit lock poisoned")
            .take();
        if tx.is_none() {
            return;
        }
        // Dropping the last sender closes the channel; workers exit once
        // they have drained what was already admitted.
        drop(tx);

        let handles: Vec<JoinHandle<()>> = {
            let mut workers = self.workers.lock().expect("dispatcher worker lock poisoned");
            workers.drain(..).collect()
        };
        for handle in handles {
            if let Err(err) = handle.await {
                tracing::error!(error = %err, "worker task failed during shutdown");
            }
        }
        tracing::info!("dispatcher shut down, all workers drained");
    }
}

/// One worker: drain the shared buffer until it is closed and empty.
///
/// An item whose context already expired is finalized with a
/// cancellation error without contacting the provider. Everything else
/// goes through the processing step inline, so the provider invocation
/// happens in exactly one place per admitted item.
async fn worker_loop(
    worker_id: usize,
    rx: Arc<tokio::sync::Mutex<mpsc::Receiver<WorkItem>>>,
    provider: Arc<dyn TextProvider>,
) {
    tracing::debug!(worker_id, "worker started");

    loop {
        let item = {
            let mut rx = rx.lock().await;
            rx.recv().await
        };
        let Some(item) = item else { break };

        if item.is_expired() {
            tracing::debug!(worker_id, request_id = %item.id, "request expired before pickup");
            item.fail(ProviderError::Cancelled);
            continue;
        }

        tracing::debug!(worker_id, request_id = %item.id, "processing request");
        crate::service::process_item(provider.as_ref(), item).await;
    }

    tracing::debug!(worker_id, "worker stopped");
}
