use aurivox_runtime::actor::{ActorContext, Handler};

use crate::dispatch::actor::SequencerActor;
use crate::dispatch::messages::OnDirectivesMessage;

impl Handler<OnDirectivesMessage> for SequencerActor {
    fn handle(&mut self, message: OnDirectivesMessage, ctx: &mut ActorContext<Self>) {
        self.on_directives(ctx.actor_ref(), message.directives);
    }
}
