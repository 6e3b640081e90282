use serde::{Deserialize, Serialize};

/// Dialog session descriptor delivered by the server alongside a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub play_service_id: String,
}

impl Session {
    pub fn new(session_id: impl Into<String>, play_service_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            play_service_id: play_service_id.into(),
        }
    }
}

/// Interaction mode a capability requests for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    None,
    MultiTurn,
}
