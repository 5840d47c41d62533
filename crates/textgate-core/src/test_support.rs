//! Provider doubles shared by the dispatch and service tests.

use crate::ports::{ProviderError, TextProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Replies immediately with a fixed string.
pub(crate) struct StaticProvider {
    response: String,
    calls: AtomicUsize,
}

impl StaticProvider {
    pub(crate) fn new(response: &str) -> Self {
        Self {
            response: response.to_owned(),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for StaticProvider {
    async fn generate(
        &self,
        _text: &str,
        _cancel: &CancellationToken,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// Parks every call until [`BlockingProvider::release`]; never released
/// it models a provider that hangs forever.
pub(crate) struct BlockingProvider {
    response: String,
    calls: AtomicUsize,
    released: watch::Sender<bool>,
}

impl BlockingProvider {
    pub(crate) fn new(response: &str) -> Self {
        let (released, _) = watch::channel(false);
        Self {
            response: response.to_owned(),
            calls: AtomicUsize::new(0),
            released,
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Let every parked and future call return immediately.
    pub(crate) fn release(&self) {
        let _ = self.released.send(true);
    }

    pub(crate) async fn wait_until_called(&self) {
        self.wait_for_calls(1).await;
    }

    /// Poll until at least `n` calls have entered the provider.
    pub(crate) async fn wait_for_calls(&self, n: usize) {
        while self.calls() < n {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

#[async_trait]
impl TextProvider for BlockingProvider {
    async fn generate(
        &self,
        _text: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut released = self.released.subscribe();
        tokio::select! {
            changed = released.wait_for(|ready| *ready) => match changed {
                Ok(_) => Ok(self.response.clone()),
                Err(_) => Err(ProviderError::Cancelled),
            },
            () = cancel.cancelled() => Err(ProviderError::Cancelled),
        }
    }
}

/// Reports cancellation on every call, like a provider that notices the
/// request's context is already done.
pub(crate) struct CancellingProvider;

#[async_trait]
impl TextProvider for CancellingProvider {
    async fn generate(
        &self,
        _text: &str,
        _cancel: &CancellationToken,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::Cancelled)
    }
}

/// Fails every call with an opaque API error.
pub(crate) struct FailingProvider {
    message: String,
}

impl FailingProvider {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

#[async_trait]
impl TextProvider for FailingProvider {
    async fn generate(
        &self,
        _text: &str,
        _cancel: &CancellationToken,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::Api {
            status: 502,
            body: self.message.clone(),
        })
    }
}
