//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or HTTP types in any signature
//! - Cancellation travels as an explicit token, never ambient state

pub mod provider;

pub use provider::{ProviderError, TextProvider};
