//! Provider adapters for the textgate gateway.
//!
//! Each adapter speaks the OpenAI-style single-turn chat-completions
//! schema over its own endpoint and credential. All of them implement
//! `textgate_core::TextProvider`; which one serves a process is decided
//! once at startup and never changes afterwards.

mod client;
mod wire;

pub mod groq;
pub mod openai;

pub use groq::GroqProvider;
pub use openai::OpenAiProvider;
