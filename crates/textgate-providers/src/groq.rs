//! Groq chat-completions provider.

use crate::client::ChatClient;
use async_trait::async_trait;
use textgate_core::{ProviderError, TextProvider};
use tokio_util::sync::CancellationToken;

const GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const GROQ_MODEL: &str = "llama-3.1-8b-instant";

/// Text provider backed by the Groq API.
pub struct GroqProvider {
    inner: ChatClient,
}

impl GroqProvider {
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            inner: ChatClient::new("groq", GROQ_URL.to_owned(), GROQ_MODEL, api_key),
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
impl TextProvider for GroqProvider {
    async fn generate(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ProviderError> {
        self.inner.generate(text, cancel).await
    }
}
