use std::sync::Arc;

use aurivox_runtime::actor::Message;

use crate::focus::{ChannelFocusInfo, FocusListener, FocusObserver};

pub(crate) struct AcquireChannelMessage {
    pub(crate) channel: String,
    pub(crate) observer: Arc<dyn FocusObserver>,
    pub(crate) interface_name: String,
}

impl Message for AcquireChannelMessage {
    type Response = bool;
}

pub(crate) struct ReleaseChannelMessage {
    pub(crate) channel: String,
    pub(crate) observer: Arc<dyn FocusObserver>,
}

impl Message for ReleaseChannelMessage {
    type Response = bool;
}

pub(crate) struct AddListenerMessage {
    pub(crate) listener: Arc<dyn FocusListener>,
}

impl Message for AddListenerMessage {
    type Response = ();
}

pub(crate) struct RemoveListenerMessage {
    pub(crate) listener: Arc<dyn FocusListener>,
}

impl Message for RemoveListenerMessage {
    type Response = ();
}

pub(crate) struct GetFocusSnapshotMessage;

impl Message for GetFocusSnapshotMessage {
    type Response = Vec<ChannelFocusInfo>;
}

pub(crate) struct ShutdownMessage;

impl Message for ShutdownMessage {
    type Response = ();
}
