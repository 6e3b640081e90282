//! Directive dispatch: handler registry plus blocking-policy gating.
//!
//! Inbound directives resolve to a handler and its [`BlockingPolicy`].
//! `pre_handle_directive` runs immediately for every directive;
//! `handle_directive` is admitted per dialog turn in arrival order,
//! deferred while an in-flight blocking directive holds the medium.
//! Handlers report completion through a [`DirectiveResultHandle`]; that
//! releases the hold and re-pumps the turn's queue.

mod actor;
mod event_hub;
mod events;
mod handlers;
mod messages;
mod registry;
mod result;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use aurivox_core::Directive;
use aurivox_runtime::actor::{ActorRef, spawn_actor_named};

use crate::error::DialogError;
use actor::SequencerActor;
use event_hub::EventHub;
use messages::{CancelDialogMessage, GroupStatusMessage, OnDirectivesMessage, ShutdownMessage};

pub use events::DispatchEvent;
pub use registry::HandlerRegistry;
pub use result::DirectiveResultHandle;

const MANAGER: &str = "directive sequencer";

/// Implemented by capability agents for each directive key they own.
///
/// `handle_directive` runs on the sequencer thread and must not block;
/// long-running work is handed to the agent's own executor and finished
/// through the result handle.
pub trait DirectiveHandler: Send + Sync {
    /// Invoked for every directive as soon as it arrives, before any
    /// policy gating (pre-fetch, validation).
    fn pre_handle_directive(&self, directive: &Directive);
    fn handle_directive(&self, directive: &Directive, result: DirectiveResultHandle);
    /// Invoked when the directive is aborted before or during handling;
    /// must release anything acquired in the earlier phases.
    fn cancel_directive(&self, directive: &Directive);
}

/// Queue depth of one dialog turn, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupStatus {
    pub queued: usize,
    pub inflight: usize,
}

#[derive(Clone)]
pub struct DispatchConfig {
    pub command_timeout: Duration,
    pub event_capacity: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            command_timeout: Duration::from_secs(5),
            event_capacity: 256,
        }
    }
}

#[derive(Clone)]
pub struct DirectiveSequencerHandle {
    actor_ref: ActorRef<SequencerActor>,
    registry: Arc<HandlerRegistry>,
    events: Arc<EventHub>,
    timeout: Duration,
}

pub fn start_directive_sequencer(
    config: DispatchConfig,
) -> Result<DirectiveSequencerHandle, DialogError> {
    let registry = Arc::new(HandlerRegistry::new());
    let events = Arc::new(EventHub::new(config.event_capacity));
    let actor = SequencerActor::new(Arc::clone(&registry), Arc::clone(&events));
    let (actor_ref, _join) = spawn_actor_named(actor, "aurivox-dispatch")
        .map_err(|e| DialogError::spawn_failed(MANAGER, e))?;
    Ok(DirectiveSequencerHandle {
        actor_ref,
        registry,
        events,
        timeout: config.command_timeout,
    })
}

impl DirectiveSequencerHandle {
    pub fn registry(&self) -> Arc<HandlerRegistry> {
        Arc::clone(&self.registry)
    }

    /// Accepts a directive batch: resolves handlers, runs pre-handling,
    /// and enqueues each directive for policy-gated dispatch.
    pub fn on_directives(&self, directives: Vec<Directive>) -> Result<(), DialogError> {
        self.actor_ref
            .call(OnDirectivesMessage { directives }, self.timeout)
            .map_err(|e| DialogError::from_call_error(MANAGER, "on_directives", self.timeout, e))
    }

    /// Aborts the whole dialog turn: queued directives are dropped and
    /// in-flight handlers get `cancel_directive`.
    pub fn cancel_dialog(&self, dialog_request_id: &str) -> Result<(), DialogError> {
        self.actor_ref
            .call(
                CancelDialogMessage {
                    dialog_request_id: dialog_request_id.to_string(),
                },
                self.timeout,
            )
            .map_err(|e| DialogError::from_call_error(MANAGER, "cancel_dialog", self.timeout, e))
    }

    pub fn group_status(&self, dialog_request_id: &str) -> Result<Option<GroupStatus>, DialogError> {
        self.actor_ref
            .call(
                GroupStatusMessage {
                    dialog_request_id: dialog_request_id.to_string(),
                },
                self.timeout,
            )
            .map_err(|e| DialogError::from_call_error(MANAGER, "group_status", self.timeout, e))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<DispatchEvent> {
        self.events.subscribe()
    }

    pub fn shutdown(&self) -> Result<(), DialogError> {
        self.actor_ref
            .call(ShutdownMessage, self.timeout)
            .map_err(|e| DialogError::from_call_error(MANAGER, "shutdown", self.timeout, e))
    }
}
