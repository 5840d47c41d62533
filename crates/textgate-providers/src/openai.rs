//! OpenAI chat-completions provider.

use crate::client::ChatClient;
use async_trait::async_trait;
use textgate_core::{ProviderError, TextProvider};
use tokio_util::sync::CancellationToken;

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Text provider backed by the OpenAI API.
pub struct OpenAiProvider {
    inner: ChatClient,
}

impl OpenAiProvider {
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            inner: ChatClient::new("openai", OPENAI_URL.to_owned(), OPENAI_MODEL, api_key),
        }
    }

    /// Point the provider at a different endpoint. Intended for tests
    /// against a local stub server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.inner.set_base_url(base_url);
        self
    }
}

#[async_trait]
impl TextProvider for OpenAiProvider {
    async fn generate(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ProviderError> {
        self.inner.generate(text, cancel).await
    }
}
