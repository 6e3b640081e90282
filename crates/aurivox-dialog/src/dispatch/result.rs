use aurivox_runtime::actor::ActorRef;

use crate::dispatch::actor::SequencerActor;
use crate::dispatch::messages::DirectiveCompletedMessage;

/// Completion handle for one in-flight directive. Consuming it reports
/// the outcome to the sequencer, releasing the directive's blocking hold
/// and re-pumping its dialog turn's queue.
///
/// Reporting after the directive was cancelled is a harmless no-op.
pub struct DirectiveResultHandle {
    message_id: String,
    dialog_request_id: String,
    actor_ref: ActorRef<SequencerActor>,
}

impl DirectiveResultHandle {
    pub(crate) fn new(
        message_id: String,
        dialog_request_id: String,
        actor_ref: ActorRef<SequencerActor>,
    ) -> Self {
        Self {
            message_id,
            dialog_request_id,
            actor_ref,
        }
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn set_completed(self) {
        self.report(Ok(()));
    }

    pub fn set_failed(self, reason: impl Into<String>) {
        self.report(Err(reason.into()));
    }

    fn report(self, result: Result<(), String>) {
        let _ = self.actor_ref.cast(DirectiveCompletedMessage {
            message_id: self.message_id,
            dialog_request_id: self.dialog_request_id,
            result,
        });
    }
}
