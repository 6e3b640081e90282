use aurivox_core::Directive;
use aurivox_runtime::actor::Message;

use crate::dispatch::GroupStatus;

pub(crate) struct OnDirectivesMessage {
    pub(crate) directives: Vec<Directive>,
}

impl Message for OnDirectivesMessage {
    type Response = ();
}

pub(crate) struct DirectiveCompletedMessage {
    pub(crate) message_id: String,
    pub(crate) dialog_request_id: String,
    pub(crate) result: Result<(), String>,
}

impl Message for DirectiveCompletedMessage {
    type Response = ();
}

pub(crate) struct CancelDialogMessage {
    pub(crate) dialog_request_id: String,
}

impl Message for CancelDialogMessage {
    type Response = ();
}

pub(crate) struct GroupStatusMessage {
    pub(crate) dialog_request_id: String,
}

impl Message for GroupStatusMessage {
    type Response = Option<GroupStatus>;
}

pub(crate) struct ShutdownMessage;

impl Message for ShutdownMessage {
    type Response = ();
}
