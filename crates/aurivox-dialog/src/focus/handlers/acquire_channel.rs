use aurivox_runtime::actor::{ActorContext, Handler};

use crate::focus::actor::FocusActor;
use crate::focus::messages::AcquireChannelMessage;

impl Handler<AcquireChannelMessage> for FocusActor {
    fn handle(&mut self, message: AcquireChannelMessage, _ctx: &mut ActorContext<Self>) -> bool {
        self.acquire(&message.channel, message.observer, &message.interface_name)
    }
}
