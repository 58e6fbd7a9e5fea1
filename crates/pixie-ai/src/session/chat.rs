//! The send path: append, request, fold the result back into the log.

use tracing::{debug, warn};

use super::manager::{build_payload, Session};
use super::prompt::FALLBACK_REPLY;
use super::types::{Author, BusyGuard, SendError};

impl Session {
    /// Send one user message and wait for the reply.
    ///
    /// Blank input is ignored. Otherwise exactly two turns are appended, the
    /// user turn before any network activity and then either the reply or
    /// [`FALLBACK_REPLY`]. A call made while another is outstanding returns
    /// [`SendError::Busy`] and changes nothing.
    pub async fn send(&self, user_text: impl Into<String>) -> Result<String, SendError> {
        let user_text = user_text.into();
        if user_text.trim().is_empty() {
            return Err(SendError::EmptyInput);
        }

        let _guard = BusyGuard::acquire(&self.busy)?;

        let payload = {
            let log = self.lock_log();
            build_payload(log.recent(self.history_window), &user_text)
        };
        let user_turn = self.append(Author::User, user_text);

        debug!(
            session = %self.id,
            turn = %user_turn.id,
            messages = payload.len(),
            "Sending chat request"
        );

        match self.client.send_message(&payload).await {
            Ok(response) => {
                self.tracker
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .record(&response.usage);
                let reply = self.append(Author::Assistant, response.content);
                debug!(
                    session = %self.id,
                    turn = %reply.id,
                    tokens = response.usage.total_tokens(),
                    "Reply received"
                );
                Ok(reply.text)
            }
            Err(e) => {
                warn!(session = %self.id, error = %e, "Chat request failed, using fallback reply");
                self.tracker
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .record_failure();
                self.append(Author::Assistant, FALLBACK_REPLY);
                Err(SendError::Ai(e))
            }
        }
    }
}
