use std::sync::Arc;

use aurivox_core::Directive;
use aurivox_runtime::actor::Message;

use crate::input::InputProcessor;

pub(crate) struct OnRequestedMessage {
    pub(crate) processor: Arc<dyn InputProcessor>,
    pub(crate) dialog_request_id: String,
}

impl Message for OnRequestedMessage {
    type Response = ();
}

pub(crate) struct OnPostProcessedMessage {
    pub(crate) directives: Vec<Directive>,
}

impl Message for OnPostProcessedMessage {
    type Response = ();
}

pub(crate) struct ResponseDeadlineFiredMessage {
    pub(crate) dialog_request_id: String,
    pub(crate) generation: u64,
}

impl Message for ResponseDeadlineFiredMessage {
    type Response = ();
}

pub(crate) struct PendingCountMessage;

impl Message for PendingCountMessage {
    type Response = usize;
}

pub(crate) struct ShutdownMessage;

impl Message for ShutdownMessage {
    type Response = ();
}
