use aurivox_runtime::actor::{ActorContext, Handler};

use crate::sync::actor::SyncActor;
use crate::sync::messages::CancelSyncMessage;

impl Handler<CancelSyncMessage> for SyncActor {
    fn handle(&mut self, message: CancelSyncMessage, _ctx: &mut ActorContext<Self>) {
        self.cancel(&message.dialog_request_id);
    }
}
