//! HTTP API for the chat panel
//!
//! Serves the embedded widget page and relays its two events, "message
//! submitted" and "reset requested", to the session manager.

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;

use crate::persona::Persona;
use crate::session::SessionManager;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub persona: Arc<Persona>,
}

impl AppState {
    pub fn new(sessions: SessionManager, persona: Persona) -> Self {
        Self {
            sessions: Arc::new(sessions),
            persona: Arc::new(persona),
        }
    }
}
