use aurivox_runtime::actor::{ActorContext, Handler};

use crate::dispatch::GroupStatus;
use crate::dispatch::actor::SequencerActor;
use crate::dispatch::messages::GroupStatusMessage;

impl Handler<GroupStatusMessage> for SequencerActor {
    fn handle(
        &mut self,
        message: GroupStatusMessage,
        _ctx: &mut ActorContext<Self>,
    ) -> Option<GroupStatus> {
        self.group_status(&message.dialog_request_id)
    }
}
