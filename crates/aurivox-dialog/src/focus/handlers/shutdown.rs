use aurivox_runtime::actor::{ActorContext, Handler};

use crate::focus::actor::FocusActor;
use crate::focus::messages::ShutdownMessage;

impl Handler<ShutdownMessage> for FocusActor {
    fn handle(&mut self, _message: ShutdownMessage, ctx: &mut ActorContext<Self>) {
        ctx.stop();
    }
}
