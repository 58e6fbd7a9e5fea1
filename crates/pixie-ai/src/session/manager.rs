//! Session struct and conversation management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use pixie_common::{SessionId, TurnId, TurnIdGenerator, DEFAULT_HISTORY_WINDOW};

use crate::token_tracker::TokenTracker;
use crate::{AiClient, Message, Role};

use super::log::ConversationLog;
use super::prompt::SYSTEM_PROMPT;
use super::types::{Author, Turn};

/// A conversation session: turn log, busy flag, and the client it talks to.
///
/// All methods take `&self`, so one `Arc<Session>` can be shared between the
/// task running [`Session::send`] and whatever renders the log meanwhile.
pub struct Session {
    pub(super) id: SessionId,
    pub(super) client: Arc<dyn AiClient>,
    /// Conversation turns, in render order.
    pub(super) log: Mutex<ConversationLog>,
    pub(super) ids: TurnIdGenerator,
    /// How many prior turns go into each request.
    pub(super) history_window: usize,
    pub(super) tracker: Mutex<TokenTracker>,
    /// Whether a send is outstanding.
    pub(super) busy: AtomicBool,
}

impl Session {
    pub fn new(client: Arc<dyn AiClient>) -> Self {
        Self {
            id: SessionId::new(),
            client,
            log: Mutex::new(ConversationLog::new()),
            ids: TurnIdGenerator::new(),
            history_window: DEFAULT_HISTORY_WINDOW,
            tracker: Mutex::new(TokenTracker::new()),
            busy: AtomicBool::new(false),
        }
    }

    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn history_window(&self) -> usize {
        self.history_window
    }

    /// Snapshot of the conversation for rendering.
    pub fn turns(&self) -> Vec<Turn> {
        self.lock_log().turns().to_vec()
    }

    pub fn turn_count(&self) -> usize {
        self.lock_log().len()
    }

    /// True while a send is waiting on the remote call.
    pub fn is_awaiting_reply(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Synthetic assistant turn to draw as a typing indicator. Not part of the
    /// log; its id is 0, which the generator never hands out.
    pub fn typing_indicator(&self) -> Option<Turn> {
        self.is_awaiting_reply().then(|| Turn {
            id: TurnId(0),
            author: Author::Assistant,
            text: String::new(),
            created_at: Utc::now(),
            pending: true,
        })
    }

    /// Snapshot of token usage so far.
    pub fn usage(&self) -> TokenTracker {
        self.tracker
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub(super) fn lock_log(&self) -> MutexGuard<'_, ConversationLog> {
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(super) fn append(&self, author: Author, text: impl Into<String>) -> Turn {
        let turn = Turn::new(self.ids.next(), author, text);
        self.lock_log().append(turn.clone());
        turn
    }
}

/// Request messages for one send: the system prompt, then `history` as
/// role-tagged messages, then the new user text.
///
/// `history` is taken before the new user turn is appended, so the window
/// never counts the message being sent; that message always rides last.
pub(crate) fn build_payload(history: &[Turn], user_text: &str) -> Vec<Message> {
    let mut msgs = Vec::with_capacity(history.len() + 2);
    msgs.push(Message {
        role: Role::System,
        content: SYSTEM_PROMPT.to_string(),
    });
    msgs.extend(history.iter().map(|turn| Message {
        role: turn.author.into(),
        content: turn.text.clone(),
    }));
    msgs.push(Message {
        role: Role::User,
        content: user_text.to_string(),
    });
    msgs
}
