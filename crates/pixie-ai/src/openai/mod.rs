//! OpenAI-compatible chat-completions client.
//!
//! Implements the `AiClient` trait with one non-streaming POST per call,
//! authenticated with a static bearer key.

mod api;
mod client;
mod config;

pub use client::OpenAiClient;
pub use config::OpenAiConfig;
