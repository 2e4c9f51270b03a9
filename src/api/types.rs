//! API request and response types

use crate::session::TranscriptView;
use serde::{Deserialize, Serialize};

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Response for a submitted message
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Reply text, or the apology when the model call failed
    pub reply: String,
    pub failed: bool,
    pub transcript: TranscriptView,
}

/// Persona metadata and panel labels
#[derive(Debug, Serialize)]
pub struct PersonaResponse {
    pub name: String,
    pub avatar_url: String,
    pub model: String,
    pub page_title: String,
    pub heading: String,
    pub tagline: String,
    pub transcript_label: String,
    pub input_placeholder: String,
    pub send_label: String,
    pub reset_label: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
