use aurivox_runtime::actor::{ActorContext, Handler};

use crate::input::actor::InputActor;
use crate::input::messages::ShutdownMessage;

impl Handler<ShutdownMessage> for InputActor {
    fn handle(&mut self, _message: ShutdownMessage, ctx: &mut ActorContext<Self>) {
        ctx.stop();
    }
}
