use aurivox_runtime::actor::{ActorContext, Handler};

use crate::dispatch::actor::SequencerActor;
use crate::dispatch::messages::DirectiveCompletedMessage;

impl Handler<DirectiveCompletedMessage> for SequencerActor {
    fn handle(&mut self, message: DirectiveCompletedMessage, ctx: &mut ActorContext<Self>) {
        self.on_completed(
            ctx.actor_ref(),
            &message.message_id,
            &message.dialog_request_id,
            message.result,
        );
    }
}
