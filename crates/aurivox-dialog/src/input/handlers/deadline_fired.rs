use aurivox_runtime::actor::{ActorContext, Handler};

use crate::input::actor::InputActor;
use crate::input::messages::ResponseDeadlineFiredMessage;

impl Handler<ResponseDeadlineFiredMessage> for InputActor {
    fn handle(&mut self, message: ResponseDeadlineFiredMessage, _ctx: &mut ActorContext<Self>) {
        self.on_deadline_fired(&message.dialog_request_id, message.generation);
    }
}
