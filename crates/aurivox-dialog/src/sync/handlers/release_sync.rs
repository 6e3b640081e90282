use aurivox_runtime::actor::{ActorContext, Handler};

use crate::sync::actor::SyncActor;
use crate::sync::messages::{ReleaseSyncImmediatelyMessage, ReleaseSyncMessage};

impl Handler<ReleaseSyncMessage> for SyncActor {
    fn handle(&mut self, message: ReleaseSyncMessage, _ctx: &mut ActorContext<Self>) {
        self.release(message.object, message.listener);
    }
}

impl Handler<ReleaseSyncImmediatelyMessage> for SyncActor {
    fn handle(&mut self, message: ReleaseSyncImmediatelyMessage, _ctx: &mut ActorContext<Self>) {
        self.release_immediately(message.object, message.listener);
    }
}
