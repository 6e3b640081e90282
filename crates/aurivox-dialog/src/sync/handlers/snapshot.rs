use aurivox_runtime::actor::{ActorContext, Handler};

use crate::sync::SyncGroupSnapshot;
use crate::sync::actor::SyncActor;
use crate::sync::messages::GroupSnapshotMessage;

impl Handler<GroupSnapshotMessage> for SyncActor {
    fn handle(
        &mut self,
        message: GroupSnapshotMessage,
        _ctx: &mut ActorContext<Self>,
    ) -> Option<SyncGroupSnapshot> {
        self.group_snapshot(&message.dialog_request_id)
    }
}
