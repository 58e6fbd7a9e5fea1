//! AI engine for Pixie.
//!
//! Provides the chat-completions client and the conversation [`Session`]:
//! - Append-only turn log with a bounded recency window for each request
//! - One remote call per user turn, folded back into the log
//! - A fixed fallback reply whenever the call fails
//! - Token usage tracking

pub mod openai;
pub mod session;
pub mod token_tracker;

use async_trait::async_trait;

pub use openai::{OpenAiClient, OpenAiConfig};
pub use session::{Author, SendError, Session, Turn, FALLBACK_REPLY, SYSTEM_PROMPT};
pub use token_tracker::TokenTracker;

/// A completion backend. The session talks to the network only through this
/// trait, so tests can substitute a scripted implementation.
#[async_trait]
pub trait AiClient: Send + Sync {
    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError>;
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// No response arrived: connect failure, reset, or timeout.
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("API error: HTTP {status}: {body}")]
    ApiError { status: u16, body: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
