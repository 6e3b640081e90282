use aurivox_runtime::actor::{ActorContext, Handler};

use crate::dispatch::actor::SequencerActor;
use crate::dispatch::messages::CancelDialogMessage;

impl Handler<CancelDialogMessage> for SequencerActor {
    fn handle(&mut self, message: CancelDialogMessage, _ctx: &mut ActorContext<Self>) {
        self.cancel_dialog(&message.dialog_request_id);
    }
}
