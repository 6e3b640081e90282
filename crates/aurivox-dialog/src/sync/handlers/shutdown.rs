use aurivox_runtime::actor::{ActorContext, Handler};

use crate::sync::actor::SyncActor;
use crate::sync::messages::ShutdownMessage;

impl Handler<ShutdownMessage> for SyncActor {
    fn handle(&mut self, _message: ShutdownMessage, ctx: &mut ActorContext<Self>) {
        ctx.stop();
    }
}
