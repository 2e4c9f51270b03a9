//! Conversation session lifecycle
//!
//! A [`Session`] is an owned value: the core operations take it and hand
//! back the next one, so nothing here touches shared state. The
//! process-wide holder lives in [`manager`].
//!
//! Turn layout is always
//! `[(user, persona instruction), (assistant, opening), (user, m1), (assistant, r1), ...]`.

mod manager;
mod transcript;

#[cfg(test)]
mod proptests;

pub use manager::SessionManager;
pub use transcript::TranscriptView;

use crate::llm::{LlmError, LlmErrorKind, LlmMessage, LlmRequest, LlmService, MessageRole};
use crate::persona::{self, PersonaSeed};
use serde::Serialize;
use uuid::Uuid;

/// Number of seed turns at the head of every session
pub const SEED_TURNS: usize = 2;

/// Speaker of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl From<Role> for MessageRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => MessageRole::User,
            Role::Assistant => MessageRole::Assistant,
        }
    }
}

/// Why a model call produced no reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: LlmErrorKind,
    pub detail: String,
}

impl From<LlmError> for Failure {
    fn from(err: LlmError) -> Self {
        Self {
            kind: err.kind,
            detail: err.message,
        }
    }
}

/// One role-tagged unit of conversation text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    /// Set on assistant turns whose text is an apology
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            failure: None,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            failure: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    fn to_message(&self) -> LlmMessage {
        LlmMessage {
            role: self.role.into(),
            text: self.text.clone(),
        }
    }
}

/// Outcome of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Generated(String),
    Failed(Failure),
}

impl Reply {
    /// Text shown to the user: the reply itself or the persona's apology
    pub fn display_text(&self) -> String {
        match self {
            Reply::Generated(text) => text.clone(),
            Reply::Failed(failure) => persona::apology(&failure.detail),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Reply::Failed(_))
    }

    fn into_turn(self) -> Turn {
        match self {
            Reply::Generated(text) => Turn::assistant(text),
            Reply::Failed(failure) => Turn {
                role: Role::Assistant,
                text: persona::apology(&failure.detail),
                failure: Some(failure),
            },
        }
    }
}

/// The live conversation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: Uuid,
    turns: Vec<Turn>,
}

impl Session {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// User/assistant pairs recorded after the seed, in submission order
    pub fn exchanges(&self) -> impl Iterator<Item = (&Turn, &Turn)> {
        self.turns
            .get(SEED_TURNS..)
            .unwrap_or_default()
            .chunks_exact(2)
            .map(|pair| (&pair[0], &pair[1]))
    }

    /// Request for the model: seed, every successful exchange, then `user_text`.
    ///
    /// Failed exchanges stay visible in the session but are never replayed
    /// to the model.
    pub fn model_request(&self, user_text: &str) -> LlmRequest {
        let mut messages: Vec<LlmMessage> = self
            .turns
            .iter()
            .take(SEED_TURNS)
            .map(Turn::to_message)
            .collect();

        for (user, assistant) in self.exchanges() {
            if !assistant.is_failed() {
                messages.push(user.to_message());
                messages.push(assistant.to_message());
            }
        }
        messages.push(LlmMessage::user(user_text));

        LlmRequest {
            system: None,
            messages,
            max_tokens: None,
        }
    }

    /// Append one exchange
    #[must_use]
    pub fn record(mut self, user_text: impl Into<String>, reply: Reply) -> Self {
        self.turns.push(Turn::user(user_text));
        self.turns.push(reply.into_turn());
        self
    }

    pub fn transcript(&self) -> TranscriptView {
        TranscriptView::of(self)
    }
}

/// A session holding only the two seed turns.
///
/// The instruction is attributed to `user`, matching how the hosted chat
/// model is primed; no dedicated system instruction is sent.
pub fn start_new_session(seed: &PersonaSeed) -> Session {
    Session {
        id: Uuid::new_v4(),
        turns: vec![
            Turn::user(seed.instruction.clone()),
            Turn::assistant(seed.opening.clone()),
        ],
    }
}

/// Forward `user_text` with the prior turns and record the exchange.
///
/// Never fails: a model error becomes an apology turn and a
/// [`Reply::Failed`]. No retry and no timeout.
pub async fn submit_message(
    session: Session,
    user_text: &str,
    llm: &dyn LlmService,
) -> (Session, Reply) {
    let request = session.model_request(user_text);

    let reply = match llm.complete(&request).await {
        Ok(response) if !response.text.trim().is_empty() => Reply::Generated(response.text),
        Ok(_) => Reply::Failed(Failure {
            kind: LlmErrorKind::Unknown,
            detail: "Model returned an empty reply".to_string(),
        }),
        Err(e) => {
            tracing::warn!(
                session_id = %session.id,
                kind = e.kind.as_str(),
                error = %e.message,
                "Model call failed, recording apology"
            );
            Reply::Failed(e.into())
        }
    };

    let session = session.record(user_text, reply.clone());
    (session, reply)
}

/// Discard `current` and start over from the seed
#[allow(clippy::needless_pass_by_value)] // Takes ownership so the old session is gone
pub fn reset_session(current: Session, seed: &PersonaSeed) -> Session {
    tracing::debug!(
        session_id = %current.id,
        turns = current.turns.len(),
        "Discarding session"
    );
    start_new_session(seed)
}
