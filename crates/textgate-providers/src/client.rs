//! Shared HTTP plumbing for chat-completions providers.

use crate::wire::{ChatRequest, ChatResponse};
use std::time::Duration;
use textgate_core::ProviderError;
use tokio_util::sync::CancellationToken;

/// One configured chat-completions backend: endpoint, model, credential,
/// and a connection-pooled client shared by every worker.
///
/// Configuration is immutable after construction, so the value is safe
/// for concurrent use without locking.
pub(crate) struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    model: &'static str,
    api_key: Option<String>,
}

impl ChatClient {
    /// `label` is only used for the missing-credential warning at
    /// startup; the error itself is surfaced per call.
    pub(crate) fn new(label: &str, base_url: String, model: &'static str, api_key: String) -> Self {
        if api_key.is_empty() {
            tracing::warn!(provider = label, "API key is not configured");
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            base_url,
            model,
            api_key: (!api_key.is_empty()).then_some(api_key),
        }
    }

    pub(crate) fn set_base_url(&mut self, base_url: String) {
        self.base_url = base_url;
    }

    /// Perform one chat-completions call, aborting when `cancel` fires.
    pub(crate) async fn generate(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::MissingApiKey);
        };

        let request = ChatRequest::single_turn(self.model, text);
        tokio::select! {
            result = self.execute(api_key, &request) => result,
            () = cancel.cancelled() => Err(ProviderError::Cancelled),
        }
    }

    async fn execute(
        &self,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyResponse)
    }
}
