use aurivox_runtime::actor::{ActorContext, Handler};

use crate::focus::actor::FocusActor;
use crate::focus::messages::ReleaseChannelMessage;

impl Handler<ReleaseChannelMessage> for FocusActor {
    fn handle(&mut self, message: ReleaseChannelMessage, _ctx: &mut ActorContext<Self>) -> bool {
        self.release(&message.channel, &message.observer)
    }
}
