//! Conversation session management.
//!
//! A `Session` owns the append-only turn log, builds the bounded request
//! for each user message, and folds the reply (or a fixed fallback) back
//! into the log.

mod chat;
mod log;
mod manager;
mod prompt;
mod types;

pub use log::ConversationLog;
pub use manager::Session;
pub use pixie_common::DEFAULT_HISTORY_WINDOW;
pub use prompt::{FALLBACK_REPLY, SYSTEM_PROMPT};
pub use types::{Author, SendError, Turn};
