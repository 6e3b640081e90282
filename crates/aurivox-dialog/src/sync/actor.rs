use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::sync::{SyncGroupSnapshot, SyncObject, SyncRequestListener};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberState {
    Prepared,
    Started,
    ReleaseRequested,
}

struct Member {
    object: Arc<dyn SyncObject>,
    state: MemberState,
    /// Listeners granted when this member's release finally happens.
    release_listeners: Vec<Arc<dyn SyncRequestListener>>,
}

#[derive(Default)]
struct SyncGroup {
    members: Vec<Member>,
}

impl SyncGroup {
    fn position(&self, object: &Arc<dyn SyncObject>) -> Option<usize> {
        self.members
            .iter()
            .position(|m| Arc::ptr_eq(&m.object, object))
    }

    fn all_release_requested(&self) -> bool {
        self.members
            .iter()
            .all(|m| m.state == MemberState::ReleaseRequested)
    }
}

pub(crate) struct SyncActor {
    groups: HashMap<String, SyncGroup>,
}

impl SyncActor {
    pub(crate) fn new() -> Self {
        Self {
            groups: HashMap::new(),
        }
    }

    pub(crate) fn prepare(&mut self, object: Arc<dyn SyncObject>) {
        let dialog_request_id = object.dialog_request_id().to_string();
        let group = self.groups.entry(dialog_request_id.clone()).or_default();
        if group.position(&object).is_some() {
            return;
        }
        debug!(
            dialog_request_id = %dialog_request_id,
            interface = object.interface_name(),
            "prepare sync object"
        );
        group.members.push(Member {
            object,
            state: MemberState::Prepared,
            release_listeners: Vec::new(),
        });
        self.broadcast(&dialog_request_id);
    }

    pub(crate) fn start(
        &mut self,
        object: Arc<dyn SyncObject>,
        listener: Arc<dyn SyncRequestListener>,
    ) {
        let dialog_request_id = object.dialog_request_id().to_string();
        let Some((group, idx)) = self
            .groups
            .get_mut(&dialog_request_id)
            .and_then(|g| g.position(&object).map(|idx| (g, idx)))
        else {
            listener.on_denied();
            return;
        };
        match group.members[idx].state {
            MemberState::Prepared => {
                group.members[idx].state = MemberState::Started;
                debug!(
                    dialog_request_id = %dialog_request_id,
                    interface = object.interface_name(),
                    "sync object started"
                );
                listener.on_granted();
                self.broadcast(&dialog_request_id);
            }
            MemberState::Started => listener.on_granted(),
            MemberState::ReleaseRequested => listener.on_denied(),
        }
    }

    pub(crate) fn release(
        &mut self,
        object: Arc<dyn SyncObject>,
        listener: Arc<dyn SyncRequestListener>,
    ) {
        let dialog_request_id = object.dialog_request_id().to_string();
        let Some((group, idx)) = self
            .groups
            .get_mut(&dialog_request_id)
            .and_then(|g| g.position(&object).map(|idx| (g, idx)))
        else {
            listener.on_denied();
            return;
        };
        let member = &mut group.members[idx];
        member.release_listeners.push(listener);
        let changed = member.state != MemberState::ReleaseRequested;
        member.state = MemberState::ReleaseRequested;
        debug!(
            dialog_request_id = %dialog_request_id,
            interface = object.interface_name(),
            "sync release requested"
        );
        if self.try_dissolve(&dialog_request_id) {
            return;
        }
        if changed {
            self.broadcast(&dialog_request_id);
        }
    }

    pub(crate) fn release_immediately(
        &mut self,
        object: Arc<dyn SyncObject>,
        listener: Arc<dyn SyncRequestListener>,
    ) {
        let dialog_request_id = object.dialog_request_id().to_string();
        let Some(group) = self.groups.get_mut(&dialog_request_id) else {
            listener.on_denied();
            return;
        };
        let Some(idx) = group.position(&object) else {
            listener.on_denied();
            return;
        };
        let member = group.members.remove(idx);
        debug!(
            dialog_request_id = %dialog_request_id,
            interface = object.interface_name(),
            "sync object released immediately"
        );
        for pending in member.release_listeners {
            pending.on_granted();
        }
        listener.on_granted();
        if group.members.is_empty() {
            self.groups.remove(&dialog_request_id);
            return;
        }
        if self.try_dissolve(&dialog_request_id) {
            return;
        }
        self.broadcast(&dialog_request_id);
    }

    pub(crate) fn cancel(&mut self, dialog_request_id: &str) {
        let Some(group) = self.groups.remove(dialog_request_id) else {
            return;
        };
        debug!(dialog_request_id, "cancel sync group");
        for member in group.members {
            for pending in member.release_listeners {
                pending.on_granted();
            }
        }
    }

    pub(crate) fn group_snapshot(&self, dialog_request_id: &str) -> Option<SyncGroupSnapshot> {
        self.groups.get(dialog_request_id).map(|group| {
            let mut snapshot = SyncGroupSnapshot::default();
            for member in &group.members {
                let name = member.object.interface_name().to_string();
                match member.state {
                    MemberState::Prepared => snapshot.prepared.push(name),
                    MemberState::Started => snapshot.started.push(name),
                    MemberState::ReleaseRequested => snapshot.pending_release.push(name),
                }
            }
            snapshot
        })
    }

    /// Removes the group once every member has requested release, firing
    /// all pending release listeners. Returns whether the group was
    /// dissolved.
    fn try_dissolve(&mut self, dialog_request_id: &str) -> bool {
        let dissolve = self
            .groups
            .get(dialog_request_id)
            .is_some_and(|g| g.all_release_requested());
        if !dissolve {
            return false;
        }
        let Some(group) = self.groups.remove(dialog_request_id) else {
            return false;
        };
        debug!(dialog_request_id, "sync group dissolved");
        for member in group.members {
            for pending in member.release_listeners {
                pending.on_granted();
            }
        }
        true
    }

    /// Delivers the current prepared/started sets to every object still
    /// registered in the group.
    fn broadcast(&self, dialog_request_id: &str) {
        let Some(group) = self.groups.get(dialog_request_id) else {
            return;
        };
        let prepared: Vec<Arc<dyn SyncObject>> = group
            .members
            .iter()
            .filter(|m| m.state == MemberState::Prepared)
            .map(|m| Arc::clone(&m.object))
            .collect();
        let started: Vec<Arc<dyn SyncObject>> = group
            .members
            .iter()
            .filter(|m| m.state == MemberState::Started)
            .map(|m| Arc::clone(&m.object))
            .collect();
        for member in &group.members {
            member.object.on_sync_state_changed(&prepared, &started);
        }
    }
}
