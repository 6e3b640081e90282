use std::sync::Arc;

use aurivox_runtime::actor::Message;

use crate::sync::{SyncGroupSnapshot, SyncObject, SyncRequestListener};

pub(crate) struct PrepareSyncMessage {
    pub(crate) object: Arc<dyn SyncObject>,
}

impl Message for PrepareSyncMessage {
    type Response = ();
}

pub(crate) struct StartSyncMessage {
    pub(crate) object: Arc<dyn SyncObject>,
    pub(crate) listener: Arc<dyn SyncRequestListener>,
}

impl Message for StartSyncMessage {
    type Response = ();
}

pub(crate) struct ReleaseSyncMessage {
    pub(crate) object: Arc<dyn SyncObject>,
    pub(crate) listener: Arc<dyn SyncRequestListener>,
}

impl Message for ReleaseSyncMessage {
    type Response = ();
}

pub(crate) struct ReleaseSyncImmediatelyMessage {
    pub(crate) object: Arc<dyn SyncObject>,
    pub(crate) listener: Arc<dyn SyncRequestListener>,
}

impl Message for ReleaseSyncImmediatelyMessage {
    type Response = ();
}

pub(crate) struct CancelSyncMessage {
    pub(crate) dialog_request_id: String,
}

impl Message for CancelSyncMessage {
    type Response = ();
}

pub(crate) struct GroupSnapshotMessage {
    pub(crate) dialog_request_id: String,
}

impl Message for GroupSnapshotMessage {
    type Response = Option<SyncGroupSnapshot>;
}

pub(crate) struct ShutdownMessage;

impl Message for ShutdownMessage {
    type Response = ();
}
