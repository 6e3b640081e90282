use aurivox_runtime::actor::{ActorContext, Handler};

use crate::sync::actor::SyncActor;
use crate::sync::messages::PrepareSyncMessage;

impl Handler<PrepareSyncMessage> for SyncActor {
    fn handle(&mut self, message: PrepareSyncMessage, _ctx: &mut ActorContext<Self>) {
        self.prepare(message.object);
    }
}
