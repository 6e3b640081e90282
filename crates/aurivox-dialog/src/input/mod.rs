//! Response tracking for outstanding dialog requests.
//!
//! Every dialog request sent upstream is registered here with a one-shot
//! deadline. Exactly one of two things then happens for that request:
//! the response directives arrive and the owning processor gets
//! `on_receive_directives`, or the deadline fires and it gets
//! `on_response_timeout` (followed by the global timeout listeners).
//! Never both, never neither.

mod actor;
mod handlers;
mod messages;

use std::sync::Arc;
use std::time::Duration;

use aurivox_core::Directive;
use aurivox_runtime::actor::{ActorRef, spawn_actor_named};
use aurivox_runtime::listeners::Listeners;

use crate::error::DialogError;
use actor::InputActor;
use messages::{
    OnPostProcessedMessage, OnRequestedMessage, PendingCountMessage, ShutdownMessage,
};

const MANAGER: &str = "input processor manager";

/// Owner of an outstanding dialog request.
pub trait InputProcessor: Send + Sync {
    fn on_receive_directives(&self, dialog_request_id: &str, directives: &[Directive]);
    fn on_response_timeout(&self, dialog_request_id: &str);
}

/// Global observer notified after the owning processor on every timeout.
pub trait ResponseTimeoutListener: Send + Sync {
    fn on_response_timeout(&self, dialog_request_id: &str);
}

#[derive(Clone)]
pub struct InputConfig {
    /// How long a dialog request may stay unanswered.
    pub response_timeout: Duration,
    pub command_timeout: Duration,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            response_timeout: Duration::from_secs(10),
            command_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Clone)]
pub struct InputProcessorManagerHandle {
    actor_ref: ActorRef<InputActor>,
    listeners: Arc<Listeners<dyn ResponseTimeoutListener>>,
    timeout: Duration,
}

pub fn start_input_processor_manager(
    config: InputConfig,
) -> Result<InputProcessorManagerHandle, DialogError> {
    let listeners: Arc<Listeners<dyn ResponseTimeoutListener>> = Arc::new(Listeners::new());
    let command_timeout = config.command_timeout;
    let actor = InputActor::new(config, Arc::clone(&listeners));
    let (actor_ref, _join) =
        spawn_actor_named(actor, "aurivox-input").map_err(|e| DialogError::spawn_failed(MANAGER, e))?;
    Ok(InputProcessorManagerHandle {
        actor_ref,
        listeners,
        timeout: command_timeout,
    })
}

impl InputProcessorManagerHandle {
    /// Records a pending dialog request and arms its response deadline.
    /// Re-registering a live id replaces the entry and disarms the old
    /// deadline.
    pub fn on_requested(
        &self,
        processor: Arc<dyn InputProcessor>,
        dialog_request_id: &str,
    ) -> Result<(), DialogError> {
        self.actor_ref
            .call(
                OnRequestedMessage {
                    processor,
                    dialog_request_id: dialog_request_id.to_string(),
                },
                self.timeout,
            )
            .map_err(|e| DialogError::from_call_error(MANAGER, "on_requested", self.timeout, e))
    }

    /// Resolves every pending request whose dialog request id appears in
    /// the batch; ids with no pending entry are ignored.
    pub fn on_post_processed(&self, directives: Vec<Directive>) -> Result<(), DialogError> {
        self.actor_ref
            .call(OnPostProcessedMessage { directives }, self.timeout)
            .map_err(|e| {
                DialogError::from_call_error(MANAGER, "on_post_processed", self.timeout, e)
            })
    }

    pub fn add_response_timeout_listener(&self, listener: Arc<dyn ResponseTimeoutListener>) {
        self.listeners.add(listener);
    }

    /// Stops future notification of `listener`; other listeners and the
    /// owning processor are unaffected. Idempotent.
    pub fn remove_response_timeout_listener(&self, listener: &Arc<dyn ResponseTimeoutListener>) {
        self.listeners.remove(listener);
    }

    pub fn pending_count(&self) -> Result<usize, DialogError> {
        self.actor_ref
            .call(PendingCountMessage, self.timeout)
            .map_err(|e| DialogError::from_call_error(MANAGER, "pending_count", self.timeout, e))
    }

    pub fn shutdown(&self) -> Result<(), DialogError> {
        self.actor_ref
            .call(ShutdownMessage, self.timeout)
            .map_err(|e| DialogError::from_call_error(MANAGER, "shutdown", self.timeout, e))
    }
}
