//! Play synchronization across one dialog turn.
//!
//! Every playable or renderable unit of a turn (TTS utterance, display
//! card, audio stream) registers a synchronize object under the turn's
//! dialog request id. The synchronizer tracks each object through
//! prepare → start → release and defers the teardown of the whole group
//! until every member has agreed to release, so a display card can stay
//! up while the audio of the same turn is still playing.
//!
//! All operations are fire-and-forget onto the synchronizer's actor
//! thread; outcomes arrive through the request listeners. Callbacks run
//! on the actor thread: re-entering the synchronizer from a callback is
//! allowed (the operation is queued), waiting for it synchronously is
//! not.

mod actor;
mod handlers;
mod messages;

use std::sync::Arc;
use std::time::Duration;

use aurivox_runtime::actor::{ActorRef, spawn_actor_named};

use crate::error::DialogError;
use actor::SyncActor;
use messages::{
    CancelSyncMessage, GroupSnapshotMessage, PrepareSyncMessage, ReleaseSyncImmediatelyMessage,
    ReleaseSyncMessage, ShutdownMessage, StartSyncMessage,
};

const MANAGER: &str = "play synchronizer";

/// A unit of work tied to a dialog turn whose lifecycle must be
/// coordinated with sibling units of the same turn.
pub trait SyncObject: Send + Sync {
    fn dialog_request_id(&self) -> &str;
    fn play_service_id(&self) -> Option<&str> {
        None
    }
    fn interface_name(&self) -> &str;
    /// Invoked whenever the prepared/started sets of this object's group
    /// change, while this object is still registered.
    fn on_sync_state_changed(&self, prepared: &[Arc<dyn SyncObject>], started: &[Arc<dyn SyncObject>]);
}

/// Outcome callback for start and release requests. Exactly one of the
/// two methods fires per request.
pub trait SyncRequestListener: Send + Sync {
    fn on_granted(&self);
    fn on_denied(&self);
}

/// Group view for diagnostics and tests; lists interface names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncGroupSnapshot {
    pub prepared: Vec<String>,
    pub started: Vec<String>,
    pub pending_release: Vec<String>,
}

#[derive(Clone)]
pub struct SyncConfig {
    pub command_timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            command_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Clone)]
pub struct PlaySynchronizerHandle {
    actor_ref: ActorRef<SyncActor>,
    timeout: Duration,
}

pub fn start_play_synchronizer(config: SyncConfig) -> Result<PlaySynchronizerHandle, DialogError> {
    let (actor_ref, _join) = spawn_actor_named(SyncActor::new(), "aurivox-sync")
        .map_err(|e| DialogError::spawn_failed(MANAGER, e))?;
    Ok(PlaySynchronizerHandle {
        actor_ref,
        timeout: config.command_timeout,
    })
}

impl PlaySynchronizerHandle {
    /// Registers `object` as prepared under its dialog request id.
    pub fn prepare_sync(&self, object: Arc<dyn SyncObject>) -> Result<(), DialogError> {
        self.actor_ref
            .cast(PrepareSyncMessage { object })
            .map_err(|_| DialogError::ActorExited {
                manager: MANAGER,
                operation: "prepare_sync",
            })
    }

    /// Transitions a prepared object to started. Denied if the object was
    /// released or never prepared; an already-started object is granted
    /// again without a state change.
    pub fn start_sync(
        &self,
        object: Arc<dyn SyncObject>,
        listener: Arc<dyn SyncRequestListener>,
    ) -> Result<(), DialogError> {
        self.actor_ref
            .cast(StartSyncMessage { object, listener })
            .map_err(|_| DialogError::ActorExited {
                manager: MANAGER,
                operation: "start_sync",
            })
    }

    /// Requests cooperative release. The listener is granted once every
    /// member of the object's group has requested release (immediately if
    /// this object is the sole member).
    pub fn release_sync(
        &self,
        object: Arc<dyn SyncObject>,
        listener: Arc<dyn SyncRequestListener>,
    ) -> Result<(), DialogError> {
        self.actor_ref
            .cast(ReleaseSyncMessage { object, listener })
            .map_err(|_| DialogError::ActorExited {
                manager: MANAGER,
                operation: "release_sync",
            })
    }

    /// Removes the object without waiting for the rest of its group.
    pub fn release_sync_immediately(
        &self,
        object: Arc<dyn SyncObject>,
        listener: Arc<dyn SyncRequestListener>,
    ) -> Result<(), DialogError> {
        self.actor_ref
            .cast(ReleaseSyncImmediatelyMessage { object, listener })
            .map_err(|_| DialogError::ActorExited {
                manager: MANAGER,
                operation: "release_sync_immediately",
            })
    }

    /// Force-releases every object of the dialog turn; used on barge-in.
    pub fn cancel_sync(&self, dialog_request_id: &str) -> Result<(), DialogError> {
        self.actor_ref
            .cast(CancelSyncMessage {
                dialog_request_id: dialog_request_id.to_string(),
            })
            .map_err(|_| DialogError::ActorExited {
                manager: MANAGER,
                operation: "cancel_sync",
            })
    }

    pub fn group_snapshot(
        &self,
        dialog_request_id: &str,
    ) -> Result<Option<SyncGroupSnapshot>, DialogError> {
        self.actor_ref
            .call(
                GroupSnapshotMessage {
                    dialog_request_id: dialog_request_id.to_string(),
                },
                self.timeout,
            )
            .map_err(|e| DialogError::from_call_error(MANAGER, "group_snapshot", self.timeout, e))
    }

    pub fn shutdown(&self) -> Result<(), DialogError> {
        self.actor_ref
            .call(ShutdownMessage, self.timeout)
            .map_err(|e| DialogError::from_call_error(MANAGER, "shutdown", self.timeout, e))
    }
}
