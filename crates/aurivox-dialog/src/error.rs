//! Typed errors for the coordination managers.
//!
//! Every public handle call that crosses onto a manager's actor thread can
//! fail in the same two ways (actor gone, call timed out); those map through
//! [`DialogError::from_call_error`] carrying the manager and operation name.

use thiserror::Error;

use aurivox_runtime::actor::CallError;

#[derive(Debug, Clone, Error)]
pub enum DialogError {
    /// Manager actor exited before the command completed.
    #[error("{manager} actor exited while handling '{operation}'")]
    ActorExited {
        manager: &'static str,
        operation: &'static str,
    },
    /// Manager actor did not answer within the configured timeout.
    #[error("{manager} command '{operation}' timed out after {timeout_ms}ms")]
    CommandTimedOut {
        manager: &'static str,
        operation: &'static str,
        timeout_ms: u128,
    },
    /// Manager thread could not be spawned.
    #[error("failed to spawn {manager} actor: {message}")]
    SpawnFailed {
        manager: &'static str,
        message: String,
    },
    /// A directive handler is already registered for this key.
    #[error("directive handler already registered for '{key}'")]
    DuplicateHandler { key: String },
}

impl DialogError {
    pub(crate) fn from_call_error(
        manager: &'static str,
        operation: &'static str,
        timeout: std::time::Duration,
        err: CallError,
    ) -> Self {
        match err {
            CallError::MailboxClosed | CallError::ActorStopped => {
                Self::ActorExited { manager, operation }
            }
            CallError::Timeout => Self::CommandTimedOut {
                manager,
                operation,
                timeout_ms: timeout.as_millis(),
            },
        }
    }

    pub(crate) fn spawn_failed(manager: &'static str, err: std::io::Error) -> Self {
        Self::SpawnFailed {
            manager,
            message: err.to_string(),
        }
    }
}
