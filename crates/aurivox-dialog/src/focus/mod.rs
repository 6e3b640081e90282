//! Focus arbitration across named output channels.
//!
//! Agents compete for exclusive output access through priority-ordered
//! channels. The holder of the highest-priority held channel is granted
//! [`FocusState::Foreground`]; every other holder is downgraded to
//! [`FocusState::Background`]. All bookkeeping lives on one actor thread.

mod actor;
mod handlers;
mod messages;

use std::sync::Arc;
use std::time::Duration;

use aurivox_core::focus::{ChannelConfiguration, FocusState, default_channels};
use aurivox_runtime::actor::{ActorRef, spawn_actor_named};

use crate::error::DialogError;
use actor::FocusActor;
use messages::{
    AcquireChannelMessage, AddListenerMessage, GetFocusSnapshotMessage, ReleaseChannelMessage,
    RemoveListenerMessage, ShutdownMessage,
};

const MANAGER: &str = "focus manager";

/// Implemented by anything that holds focus: audio players, TTS output,
/// display cards. Callbacks arrive on the focus actor thread and must not
/// block.
pub trait FocusObserver: Send + Sync {
    fn on_focus_changed(&self, channel: &str, state: FocusState);
}

/// Telemetry listener observing every transition on every channel.
pub trait FocusListener: Send + Sync {
    fn on_focus_transition(&self, channel: &str, interface_name: &str, state: FocusState);
}

#[derive(Clone)]
pub struct FocusConfig {
    pub channels: Vec<ChannelConfiguration>,
    pub command_timeout: Duration,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            channels: default_channels(),
            command_timeout: Duration::from_secs(5),
        }
    }
}

/// Per-channel view returned by [`FocusManagerHandle::snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelFocusInfo {
    pub channel: String,
    pub interface_name: Option<String>,
    pub state: FocusState,
}

#[derive(Clone)]
pub struct FocusManagerHandle {
    actor_ref: ActorRef<FocusActor>,
    timeout: Duration,
}

pub fn start_focus_manager(config: FocusConfig) -> Result<FocusManagerHandle, DialogError> {
    let timeout = config.command_timeout;
    let actor = FocusActor::new(config.channels);
    let (actor_ref, _join) = spawn_actor_named(actor, "aurivox-focus")
        .map_err(|e| DialogError::spawn_failed(MANAGER, e))?;
    Ok(FocusManagerHandle { actor_ref, timeout })
}

impl FocusManagerHandle {
    /// Registers `observer` as the channel's holder and recomputes the
    /// global focus assignment. Returns `false` for an unknown channel.
    pub fn acquire_channel(
        &self,
        channel: &str,
        observer: Arc<dyn FocusObserver>,
        interface_name: &str,
    ) -> Result<bool, DialogError> {
        self.actor_ref
            .call(
                AcquireChannelMessage {
                    channel: channel.to_string(),
                    observer,
                    interface_name: interface_name.to_string(),
                },
                self.timeout,
            )
            .map_err(|e| DialogError::from_call_error(MANAGER, "acquire_channel", self.timeout, e))
    }

    /// [`Self::acquire_channel`] for async callers.
    pub async fn acquire_channel_async(
        &self,
        channel: &str,
        observer: Arc<dyn FocusObserver>,
        interface_name: &str,
    ) -> Result<bool, DialogError> {
        self.actor_ref
            .call_async(
                AcquireChannelMessage {
                    channel: channel.to_string(),
                    observer,
                    interface_name: interface_name.to_string(),
                },
                self.timeout,
            )
            .await
            .map_err(|e| DialogError::from_call_error(MANAGER, "acquire_channel", self.timeout, e))
    }

    /// Releases the channel. Resolves only after the observer has been
    /// fully removed and every resulting notification delivered; `false`
    /// if the observer did not hold the channel.
    pub async fn release_channel(
        &self,
        channel: &str,
        observer: &Arc<dyn FocusObserver>,
    ) -> Result<bool, DialogError> {
        self.actor_ref
            .call_async(
                ReleaseChannelMessage {
                    channel: channel.to_string(),
                    observer: Arc::clone(observer),
                },
                self.timeout,
            )
            .await
            .map_err(|e| DialogError::from_call_error(MANAGER, "release_channel", self.timeout, e))
    }

    pub fn add_listener(&self, listener: Arc<dyn FocusListener>) -> Result<(), DialogError> {
        self.actor_ref
            .call(AddListenerMessage { listener }, self.timeout)
            .map_err(|e| DialogError::from_call_error(MANAGER, "add_listener", self.timeout, e))
    }

    pub fn remove_listener(&self, listener: &Arc<dyn FocusListener>) -> Result<(), DialogError> {
        self.actor_ref
            .call(
                RemoveListenerMessage {
                    listener: Arc::clone(listener),
                },
                self.timeout,
            )
            .map_err(|e| DialogError::from_call_error(MANAGER, "remove_listener", self.timeout, e))
    }

    pub fn snapshot(&self) -> Result<Vec<ChannelFocusInfo>, DialogError> {
        self.actor_ref
            .call(GetFocusSnapshotMessage, self.timeout)
            .map_err(|e| DialogError::from_call_error(MANAGER, "snapshot", self.timeout, e))
    }

    pub fn shutdown(&self) -> Result<(), DialogError> {
        self.actor_ref
            .call(ShutdownMessage, self.timeout)
            .map_err(|e| DialogError::from_call_error(MANAGER, "shutdown", self.timeout, e))
    }
}
