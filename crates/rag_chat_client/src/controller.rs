//! Request controller, submission path: drives one question from submit to
//! a normalized transcript entry.

use std::sync::{Arc, Mutex};

use crate::client::ApiClient;
use crate::messages::AnsweredQuery;
use crate::session::{SessionState, TranscriptEntry};

/// Fixed text appended as the bot entry for any failed submission. The
/// underlying error detail goes to the log, never to the transcript.
pub const CONNECT_FAILURE_MESSAGE: &str =
    "Failed to connect to the server. Please try again later.";

/// Owns the session state and performs question submissions against the
/// service. The health probe shares the same state through `state()`.
pub struct ChatController {
    state: Arc<Mutex<SessionState>>,
    api: ApiClient,
}

impl ChatController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new())),
            api,
        }
    }

    /// Shared handle to the session state, for rendering and for the
    /// health probe.
    pub fn state(&self) -> Arc<Mutex<SessionState>> {
        Arc::clone(&self.state)
    }

    /// Submit one question.
    ///
    /// A question that trims to empty, or a call while another submission
    /// is pending, is silently ignored: no entry, no request, no flag
    /// change. Otherwise the raw untrimmed question is appended as a user
    /// entry, the in-flight flag is raised, the draft is cleared, and
    /// exactly one request is issued. Success appends the rendered answer
    /// as a bot entry; any failure appends `CONNECT_FAILURE_MESSAGE`.
    /// Both outcomes clear the in-flight flag.
    pub async fn submit(&self, question: &str) {
        {
            let mut state = self.state.lock().expect("session state lock poisoned");
            if state.is_pending() || question.trim().is_empty() {
                return;
            }
            state.push_entry(TranscriptEntry::user(question));
            state.set_pending(true);
            state.set_draft("");
        }

        // The lock is never held across the request.
        let reply = match self.api.ask(question).await {
            Ok(response) => render_or_failure(AnsweredQuery::from(response)),
            Err(error) => {
                tracing::warn!(%error, "question submission failed");
                CONNECT_FAILURE_MESSAGE.to_string()
            }
        };

        let mut state = self.state.lock().expect("session state lock poisoned");
        state.push_entry(TranscriptEntry::bot(reply));
        state.set_pending(false);
    }
}

fn render_or_failure(answered: AnsweredQuery) -> String {
    match answered.render() {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!(%error, "failed to render answer");
            CONNECT_FAILURE_MESSAGE.to_string()
        }
    }
}
