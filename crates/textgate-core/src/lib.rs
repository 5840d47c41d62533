//! Core domain types and request dispatch for textgate.
//!
//! This crate owns the parts of the gateway with genuine design content:
//! the bounded admission queue + worker pool ([`dispatch`]), the
//! per-request orchestration ([`service`]), and the provider port that
//! adapters implement ([`ports`]). No HTTP or wire-format types appear
//! in any signature here; those belong to the adapter crates.

pub mod dispatch;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(test)]
mod test_support;

// Re-export commonly used types for convenience
pub use dispatch::{Dispatcher, SubmitError, WorkItem};
pub use domain::{Completion, Outcome};
pub use ports::{ProviderError, TextProvider};
pub use service::{CoordinatorConfig, RequestCoordinator, RequestError};
