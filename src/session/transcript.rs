//! Display projection of a session

use super::{Session, SEED_TURNS};
use serde::Serialize;
use uuid::Uuid;

/// One bubble pair in the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    /// `None` only for the opening greeting
    pub user: Option<String>,
    pub assistant: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
}

/// What the panel renders: the greeting, then one entry per exchange.
///
/// The persona instruction turn is never shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptView {
    pub session_id: Uuid,
    pub entries: Vec<TranscriptEntry>,
}

impl TranscriptView {
    pub(super) fn of(session: &Session) -> Self {
        let greeting = session
            .turns
            .get(SEED_TURNS - 1)
            .map(|opening| TranscriptEntry {
                user: None,
                assistant: opening.text.clone(),
                failed: false,
            });

        let exchanges = session.exchanges().map(|(user, assistant)| TranscriptEntry {
            user: Some(user.text.clone()),
            assistant: assistant.text.clone(),
            failed: assistant.is_failed(),
        });

        Self {
            session_id: session.id,
            entries: greeting.into_iter().chain(exchanges).collect(),
        }
    }
}
