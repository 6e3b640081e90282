use aurivox_runtime::actor::{ActorContext, Handler};

use crate::sync::actor::SyncActor;
use crate::sync::messages::StartSyncMessage;

impl Handler<StartSyncMessage> for SyncActor {
    fn handle(&mut self, message: StartSyncMessage, _ctx: &mut ActorContext<Self>) {
        self.start(message.object, message.listener);
    }
}
