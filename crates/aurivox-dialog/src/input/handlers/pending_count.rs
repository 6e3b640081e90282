use aurivox_runtime::actor::{ActorContext, Handler};

use crate::input::actor::InputActor;
use crate::input::messages::PendingCountMessage;

impl Handler<PendingCountMessage> for InputActor {
    fn handle(&mut self, _message: PendingCountMessage, _ctx: &mut ActorContext<Self>) -> usize {
        self.pending_count()
    }
}
