//! Turn types, send errors, and the concurrency guard.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use pixie_common::TurnId;

use crate::{AiError, Role};

/// Who wrote a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Author {
    User,
    Assistant,
}

impl From<Author> for Role {
    fn from(author: Author) -> Self {
        match author {
            Author::User => Role::User,
            Author::Assistant => Role::Assistant,
        }
    }
}

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub id: TurnId,
    pub author: Author,
    pub text: String,
    /// Display only; log order is insertion order.
    pub created_at: DateTime<Utc>,
    /// Set only on the synthetic typing-indicator turn.
    pub pending: bool,
}

impl Turn {
    pub(crate) fn new(id: TurnId, author: Author, text: impl Into<String>) -> Self {
        Self {
            id,
            author,
            text: text.into(),
            created_at: Utc::now(),
            pending: false,
        }
    }

    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }
}

/// Why `Session::send` did not return a reply.
///
/// `EmptyInput` and `Busy` leave the log untouched. `Ai` means the fallback
/// reply was appended in place of a real one.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("message is empty")]
    EmptyInput,
    #[error("session is busy with another request")]
    Busy,
    #[error(transparent)]
    Ai(#[from] AiError),
}

/// Guard that clears the `busy` flag on drop, ensuring it is always released
/// even if the future is cancelled or an early return occurs.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Attempt to acquire the busy lock. Returns `Err` if already busy.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Result<Self, SendError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(SendError::Busy);
        }
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
