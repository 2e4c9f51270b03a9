//! HTTP request handlers

use super::assets::{index_html, serve_static};
use super::types::{ChatRequest, ChatResponse, ErrorResponse, PersonaResponse};
use super::AppState;
use crate::session::TranscriptView;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the widget page
        .route("/", get(serve_page))
        // Static assets
        .route("/assets/*path", get(serve_static))
        // Panel metadata
        .route("/api/persona", get(get_persona))
        // Current transcript
        .route("/api/transcript", get(get_transcript))
        // Events
        .route("/api/chat", post(send_chat))
        .route("/api/reset", post(reset_chat))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Page
// ============================================================

async fn serve_page() -> Response {
    index_html().unwrap_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - panel page not embedded</h1>"),
        )
            .into_response()
    })
}

async fn get_persona(State(state): State<AppState>) -> Json<PersonaResponse> {
    let persona = &state.persona;
    let panel = &persona.panel;
    Json(PersonaResponse {
        name: persona.name.clone(),
        avatar_url: persona.avatar_url.clone(),
        model: state.sessions.model_id().to_string(),
        page_title: panel.page_title.clone(),
        heading: panel.heading.clone(),
        tagline: panel.tagline.clone(),
        transcript_label: panel.transcript_label.clone(),
        input_placeholder: panel.input_placeholder.clone(),
        send_label: panel.send_label.clone(),
        reset_label: panel.reset_label.clone(),
    })
}

// ============================================================
// Transcript and events
// ============================================================

async fn get_transcript(State(state): State<AppState>) -> Json<TranscriptView> {
    Json(state.sessions.transcript().await)
}

async fn send_chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(req) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if req.text.trim().is_empty() {
        return Err(AppError::BadRequest("Message text is empty".to_string()));
    }

    // Run on its own task so a client disconnect cannot abort a submission
    let sessions = state.sessions.clone();
    let (reply, transcript) = tokio::spawn(async move { sessions.submit(&req.text).await })
        .await
        .map_err(|e| AppError::Internal(format!("Submission task failed: {e}")))?;

    Ok(Json(ChatResponse {
        failed: reply.is_failed(),
        reply: reply.display_text(),
        transcript,
    }))
}

async fn reset_chat(State(state): State<AppState>) -> Json<TranscriptView> {
    Json(state.sessions.reset().await)
}

async fn get_version() -> &'static str {
    concat!("persona-chat ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
