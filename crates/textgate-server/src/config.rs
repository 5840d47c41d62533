//! Environment configuration for the server binary.

use std::fmt;

/// Size of the worker pool draining the admission queue.
pub const WORKER_COUNT: usize = 5;

/// Default admission buffer capacity.
const DEFAULT_QUEUE_CAPACITY: usize = 10;

/// Which provider backend serves this process. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Groq,
    OpenAi,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Groq => write!(f, "groq"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

/// Process configuration, immutable after load.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub provider: ProviderKind,
    pub groq_api_key: String,
    pub openai_api_key: String,
    pub queue_capacity: usize,
}

impl Config {
    /// Read configuration from the environment, applying defaults.
    /// Never fails: unknown or malformed values fall back with a
    /// warning, matching the gateway's degrade-don't-refuse posture.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            server_addr: env_or("SERVER_ADDR", "0.0.0.0:8080"),
            provider: parse_provider(&env_or("AI_PROVIDER", "groq")),
            groq_api_key: env_or("GROQ_API_KEY", ""),
            openai_api_key: env_or("OPENAI_API_KEY", ""),
            queue_capacity: parse_capacity(std::env::var("QUEUE_CAPACITY").ok().as_deref()),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

fn parse_provider(raw: &str) -> ProviderKind {
    match raw {
        "groq" => ProviderKind::Groq,
        "openai" => ProviderKind::OpenAi,
        other => {
            tracing::warn!(provider = other, "unknown AI provider, falling back to groq");
            ProviderKind::Groq
        }
    }
}

fn parse_capacity(raw: Option<&str>) -> usize {
    match raw {
        None => DEFAULT_QUEUE_CAPACITY,
        // A zero-capacity buffer is as unusable as a malformed one: the
        // admission channel requires at least one slot.
        Some(value) => value
            .parse()
            .ok()
            .filter(|&capacity: &usize| capacity > 0)
            .unwrap_or_else(|| {
                tracing::warn!(value, "invalid QUEUE_CAPACITY, using default");
                DEFAULT_QUEUE_CAPACITY
            }),
    }
}
