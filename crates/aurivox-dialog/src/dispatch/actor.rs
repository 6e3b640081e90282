use std::collections::{HashMap, VecDeque};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tracing::{debug, warn};

use aurivox_core::{BlockingPolicy, Directive};
use aurivox_runtime::actor::ActorRef;

use crate::dispatch::GroupStatus;
use crate::dispatch::event_hub::EventHub;
use crate::dispatch::events::DispatchEvent;
use crate::dispatch::registry::{HandlerEntry, HandlerRegistry};
use crate::dispatch::result::DirectiveResultHandle;

struct QueuedDirective {
    directive: Directive,
    entry: HandlerEntry,
}

#[derive(Default)]
struct DialogGroup {
    queue: VecDeque<QueuedDirective>,
    inflight: Vec<QueuedDirective>,
}

impl DialogGroup {
    fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.inflight.is_empty()
    }
}

pub(crate) struct SequencerActor {
    registry: Arc<HandlerRegistry>,
    events: Arc<EventHub>,
    groups: HashMap<String, DialogGroup>,
}

impl SequencerActor {
    pub(crate) fn new(registry: Arc<HandlerRegistry>, events: Arc<EventHub>) -> Self {
        Self {
            registry,
            events,
            groups: HashMap::new(),
        }
    }

    pub(crate) fn on_directives(&mut self, self_ref: ActorRef<Self>, directives: Vec<Directive>) {
        let mut touched: Vec<String> = Vec::new();
        for directive in directives {
            let key = directive.key();
            let Some(entry) = self.registry.resolve(&key) else {
                warn!(key = %key, message_id = directive.message_id(), "no handler registered");
                self.events.emit(DispatchEvent::Dropped {
                    key,
                    message_id: directive.message_id().to_string(),
                    dialog_request_id: directive.dialog_request_id().to_string(),
                    reason: "no handler registered".to_string(),
                });
                continue;
            };

            let pre_handle =
                catch_unwind(AssertUnwindSafe(|| entry.handler.pre_handle_directive(&directive)));
            if pre_handle.is_err() {
                warn!(key = %key, message_id = directive.message_id(), "pre-handle panicked");
                self.events.emit(DispatchEvent::Failed {
                    key,
                    message_id: directive.message_id().to_string(),
                    dialog_request_id: directive.dialog_request_id().to_string(),
                    reason: "pre-handle panicked".to_string(),
                });
                continue;
            }

            let dialog_request_id = directive.dialog_request_id().to_string();
            if !touched.contains(&dialog_request_id) {
                touched.push(dialog_request_id.clone());
            }
            self.groups
                .entry(dialog_request_id)
                .or_default()
                .queue
                .push_back(QueuedDirective { directive, entry });
        }
        for dialog_request_id in touched {
            self.dispatch_ready(&self_ref, &dialog_request_id);
        }
    }

    pub(crate) fn on_completed(
        &mut self,
        self_ref: ActorRef<Self>,
        message_id: &str,
        dialog_request_id: &str,
        result: Result<(), String>,
    ) {
        if !self.finish(dialog_request_id, message_id, result) {
            return;
        }
        self.dispatch_ready(&self_ref, dialog_request_id);
        self.drop_group_if_idle(dialog_request_id);
    }

    pub(crate) fn cancel_dialog(&mut self, dialog_request_id: &str) {
        let Some(group) = self.groups.remove(dialog_request_id) else {
            return;
        };
        debug!(dialog_request_id, "cancel dialog turn");
        for item in group.inflight.into_iter().chain(group.queue) {
            let cancel = catch_unwind(AssertUnwindSafe(|| {
                item.entry.handler.cancel_directive(&item.directive)
            }));
            if cancel.is_err() {
                warn!(
                    message_id = item.directive.message_id(),
                    "cancel-directive panicked"
                );
            }
            self.events.emit(DispatchEvent::Cancelled {
                key: item.directive.key(),
                message_id: item.directive.message_id().to_string(),
                dialog_request_id: dialog_request_id.to_string(),
            });
        }
    }

    pub(crate) fn group_status(&self, dialog_request_id: &str) -> Option<GroupStatus> {
        self.groups.get(dialog_request_id).map(|g| GroupStatus {
            queued: g.queue.len(),
            inflight: g.inflight.len(),
        })
    }

    /// Admits and dispatches every queued directive of the turn that is
    /// not deferred by a blocking hold, looping while panicking handlers
    /// free up further admissions.
    fn dispatch_ready(&mut self, self_ref: &ActorRef<Self>, dialog_request_id: &str) {
        loop {
            let admitted = self.admit(dialog_request_id);
            if admitted.is_empty() {
                return;
            }
            let mut panicked: Vec<String> = Vec::new();
            for item in admitted {
                let handle = DirectiveResultHandle::new(
                    item.directive.message_id().to_string(),
                    dialog_request_id.to_string(),
                    self_ref.clone(),
                );
                debug!(
                    key = %item.directive.key(),
                    message_id = item.directive.message_id(),
                    "directive admitted"
                );
                let outcome = catch_unwind(AssertUnwindSafe(|| {
                    item.entry.handler.handle_directive(&item.directive, handle)
                }));
                let message_id = item.directive.message_id().to_string();
                self.groups
                    .entry(dialog_request_id.to_string())
                    .or_default()
                    .inflight
                    .push(item);
                if outcome.is_err() {
                    panicked.push(message_id);
                }
            }
            if panicked.is_empty() {
                return;
            }
            for message_id in panicked {
                self.finish(
                    dialog_request_id,
                    &message_id,
                    Err("handler panicked".to_string()),
                );
            }
        }
    }

    /// Scans the turn's queue in arrival order, collecting directives not
    /// blocked by in-flight holds. An earlier queued blocking directive
    /// also defers later ones it covers, so admission never reorders a
    /// blocked medium.
    fn admit(&mut self, dialog_request_id: &str) -> Vec<QueuedDirective> {
        let Some(group) = self.groups.get_mut(dialog_request_id) else {
            return Vec::new();
        };
        let mut holds: Vec<BlockingPolicy> = group
            .inflight
            .iter()
            .filter(|i| i.entry.policy.is_blocking)
            .map(|i| i.entry.policy)
            .collect();
        let mut admitted = Vec::new();
        let mut deferred = VecDeque::new();
        while let Some(item) = group.queue.pop_front() {
            let blocked = holds.iter().any(|h| h.blocks(&item.entry.policy));
            if item.entry.policy.is_blocking {
                holds.push(item.entry.policy);
            }
            if blocked {
                deferred.push_back(item);
            } else {
                admitted.push(item);
            }
        }
        group.queue = deferred;
        admitted
    }

    /// Removes one in-flight directive and emits its outcome. Returns
    /// `false` when the directive is unknown (already completed or the
    /// turn was cancelled), which callers treat as a no-op.
    fn finish(
        &mut self,
        dialog_request_id: &str,
        message_id: &str,
        result: Result<(), String>,
    ) -> bool {
        let Some(group) = self.groups.get_mut(dialog_request_id) else {
            return false;
        };
        let Some(idx) = group
            .inflight
            .iter()
            .position(|i| i.directive.message_id() == message_id)
        else {
            return false;
        };
        let item = group.inflight.remove(idx);
        let key = item.directive.key();
        match result {
            Ok(()) => {
                debug!(key = %key, message_id, "directive completed");
                self.events.emit(DispatchEvent::Completed {
                    key,
                    message_id: message_id.to_string(),
                    dialog_request_id: dialog_request_id.to_string(),
                });
            }
            Err(reason) => {
                warn!(key = %key, message_id, reason = %reason, "directive failed");
                self.events.emit(DispatchEvent::Failed {
                    key,
                    message_id: message_id.to_string(),
                    dialog_request_id: dialog_request_id.to_string(),
                    reason,
                });
            }
        }
        true
    }

    fn drop_group_if_idle(&mut self, dialog_request_id: &str) {
        if self
            .groups
            .get(dialog_request_id)
            .is_some_and(DialogGroup::is_idle)
        {
            self.groups.remove(dialog_request_id);
        }
    }
}
