use aurivox_runtime::actor::{ActorContext, Handler};

use crate::focus::actor::FocusActor;
use crate::focus::messages::{AddListenerMessage, RemoveListenerMessage};

impl Handler<AddListenerMessage> for FocusActor {
    fn handle(&mut self, message: AddListenerMessage, _ctx: &mut ActorContext<Self>) {
        self.add_listener(message.listener);
    }
}

impl Handler<RemoveListenerMessage> for FocusActor {
    fn handle(&mut self, message: RemoveListenerMessage, _ctx: &mut ActorContext<Self>) {
        self.remove_listener(&message.listener);
    }
}
