use aurivox_runtime::actor::{ActorContext, Handler};

use crate::focus::ChannelFocusInfo;
use crate::focus::actor::FocusActor;
use crate::focus::messages::GetFocusSnapshotMessage;

impl Handler<GetFocusSnapshotMessage> for FocusActor {
    fn handle(
        &mut self,
        _message: GetFocusSnapshotMessage,
        _ctx: &mut ActorContext<Self>,
    ) -> Vec<ChannelFocusInfo> {
        self.snapshot()
    }
}
