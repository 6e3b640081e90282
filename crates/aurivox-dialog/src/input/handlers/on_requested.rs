use aurivox_runtime::actor::{ActorContext, Handler};

use crate::input::actor::InputActor;
use crate::input::messages::OnRequestedMessage;

impl Handler<OnRequestedMessage> for InputActor {
    fn handle(&mut self, message: OnRequestedMessage, ctx: &mut ActorContext<Self>) {
        self.on_requested(ctx.actor_ref(), message.processor, message.dialog_request_id);
    }
}
