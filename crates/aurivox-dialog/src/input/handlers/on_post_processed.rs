use aurivox_runtime::actor::{ActorContext, Handler};

use crate::input::actor::InputActor;
use crate::input::messages::OnPostProcessedMessage;

impl Handler<OnPostProcessedMessage> for InputActor {
    fn handle(&mut self, message: OnPostProcessedMessage, _ctx: &mut ActorContext<Self>) {
        self.on_post_processed(message.directives);
    }
}
