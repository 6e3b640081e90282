use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use aurivox_core::Directive;
use aurivox_runtime::actor::ActorRef;
use aurivox_runtime::deadline::Deadline;
use aurivox_runtime::listeners::Listeners;

use crate::input::messages::ResponseDeadlineFiredMessage;
use crate::input::{InputConfig, InputProcessor, ResponseTimeoutListener};

struct PendingRequest {
    processor: Arc<dyn InputProcessor>,
    /// Distinguishes a late deadline of a replaced registration from the
    /// live one for the same dialog request id.
    generation: u64,
    _deadline: Deadline,
}

pub(crate) struct InputActor {
    config: InputConfig,
    pending: HashMap<String, PendingRequest>,
    listeners: Arc<Listeners<dyn ResponseTimeoutListener>>,
    next_generation: u64,
}

impl InputActor {
    pub(crate) fn new(
        config: InputConfig,
        listeners: Arc<Listeners<dyn ResponseTimeoutListener>>,
    ) -> Self {
        Self {
            config,
            pending: HashMap::new(),
            listeners,
            next_generation: 0,
        }
    }

    pub(crate) fn on_requested(
        &mut self,
        self_ref: ActorRef<Self>,
        processor: Arc<dyn InputProcessor>,
        dialog_request_id: String,
    ) {
        self.next_generation += 1;
        let generation = self.next_generation;
        let fire_id = dialog_request_id.clone();
        let deadline = Deadline::arm(self.config.response_timeout, move || {
            let _ = self_ref.cast(ResponseDeadlineFiredMessage {
                dialog_request_id: fire_id,
                generation,
            });
        });
        debug!(
            dialog_request_id = %dialog_request_id,
            timeout_ms = self.config.response_timeout.as_millis() as u64,
            "dialog request pending"
        );
        // Replacing a live entry drops its Deadline, which disarms it.
        self.pending.insert(
            dialog_request_id,
            PendingRequest {
                processor,
                generation,
                _deadline: deadline,
            },
        );
    }

    pub(crate) fn on_deadline_fired(&mut self, dialog_request_id: &str, generation: u64) {
        let live = self
            .pending
            .get(dialog_request_id)
            .is_some_and(|p| p.generation == generation);
        if !live {
            return;
        }
        let Some(entry) = self.pending.remove(dialog_request_id) else {
            return;
        };
        warn!(dialog_request_id, "dialog request timed out");
        entry.processor.on_response_timeout(dialog_request_id);
        self.listeners
            .notify(|l| l.on_response_timeout(dialog_request_id));
    }

    pub(crate) fn on_post_processed(&mut self, directives: Vec<Directive>) {
        let mut order: Vec<String> = Vec::new();
        let mut batches: HashMap<String, Vec<Directive>> = HashMap::new();
        for directive in directives {
            let id = directive.dialog_request_id().to_string();
            if !batches.contains_key(&id) {
                order.push(id.clone());
            }
            batches.entry(id).or_default().push(directive);
        }
        for id in order {
            let Some(entry) = self.pending.remove(&id) else {
                continue;
            };
            let batch = batches.remove(&id).unwrap_or_default();
            debug!(
                dialog_request_id = %id,
                directives = batch.len(),
                "dialog request resolved"
            );
            entry.processor.on_receive_directives(&id, &batch);
        }
    }

    pub(crate) fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
