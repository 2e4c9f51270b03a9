//! Process-wide holder for the one active session

use super::{reset_session, start_new_session, submit_message, Reply, Session, TranscriptView};
use crate::llm::LlmService;
use crate::persona::PersonaSeed;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Owns the active session and serializes every event against it.
///
/// Submit and reset hold the lock for their whole duration, including the
/// model call, so events complete one at a time in arrival order.
pub struct SessionManager {
    seed: PersonaSeed,
    llm: Arc<dyn LlmService>,
    session: Mutex<Session>,
}

impl SessionManager {
    pub fn new(seed: PersonaSeed, llm: Arc<dyn LlmService>) -> Self {
        let session = start_new_session(&seed);
        tracing::info!(session_id = %session.id(), "Session started");
        Self {
            seed,
            llm,
            session: Mutex::new(session),
        }
    }

    /// Handle a "message submitted" event
    pub async fn submit(&self, user_text: &str) -> (Reply, TranscriptView) {
        let mut guard = self.session.lock().await;

        // Work on a copy so a dropped future leaves the session untouched
        let (next, reply) = submit_message(guard.clone(), user_text, self.llm.as_ref()).await;

        tracing::info!(
            session_id = %next.id(),
            turns = next.turns().len(),
            failed = reply.is_failed(),
            "Exchange recorded"
        );

        let view = next.transcript();
        *guard = next;
        (reply, view)
    }

    /// Handle a "reset requested" event
    pub async fn reset(&self) -> TranscriptView {
        let mut guard = self.session.lock().await;
        let fresh = reset_session(guard.clone(), &self.seed);
        tracing::info!(session_id = %fresh.id(), "Session reset");

        let view = fresh.transcript();
        *guard = fresh;
        view
    }

    pub async fn transcript(&self) -> TranscriptView {
        self.session.lock().await.transcript()
    }

    /// Copy of the current session
    #[cfg(test)]
    pub async fn snapshot(&self) -> Session {
        self.session.lock().await.clone()
    }

    pub fn model_id(&self) -> &str {
        self.llm.model_id()
    }
}
