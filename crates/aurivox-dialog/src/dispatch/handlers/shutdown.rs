use aurivox_runtime::actor::{ActorContext, Handler};

use crate::dispatch::actor::SequencerActor;
use crate::dispatch::messages::ShutdownMessage;

impl Handler<ShutdownMessage> for SequencerActor {
    fn handle(&mut self, _message: ShutdownMessage, ctx: &mut ActorContext<Self>) {
        ctx.stop();
    }
}
