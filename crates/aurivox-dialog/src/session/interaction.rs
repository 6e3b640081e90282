use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::debug;

use aurivox_core::InteractionMode;
use aurivox_runtime::listeners::Listeners;

pub trait InteractionControlListener: Send + Sync {
    fn on_multi_turn_changed(&self, active: bool);
}

/// Tracks which capabilities are holding the conversation open for
/// another user turn. Listeners are told when the first multi-turn
/// requester starts and when the last one finishes.
pub struct InteractionControlManager {
    requesters: Mutex<HashSet<String>>,
    listeners: Listeners<dyn InteractionControlListener>,
}

impl InteractionControlManager {
    pub fn new() -> Self {
        Self {
            requesters: Mutex::new(HashSet::new()),
            listeners: Listeners::new(),
        }
    }

    pub fn start(&self, mode: InteractionMode, requester: &str) {
        if mode != InteractionMode::MultiTurn {
            return;
        }
        let became_active = {
            let mut requesters = self.lock();
            let was_empty = requesters.is_empty();
            requesters.insert(requester.to_string()) && was_empty
        };
        if became_active {
            debug!(requester, "multi-turn interaction started");
            self.listeners.notify(|l| l.on_multi_turn_changed(true));
        }
    }

    pub fn finish(&self, mode: InteractionMode, requester: &str) {
        if mode != InteractionMode::MultiTurn {
            return;
        }
        let became_idle = {
            let mut requesters = self.lock();
            requesters.remove(requester) && requesters.is_empty()
        };
        if became_idle {
            debug!(requester, "multi-turn interaction finished");
            self.listeners.notify(|l| l.on_multi_turn_changed(false));
        }
    }

    pub fn is_multi_turn_active(&self) -> bool {
        !self.lock().is_empty()
    }

    pub fn add_listener(&self, listener: Arc<dyn InteractionControlListener>) {
        self.listeners.add(listener);
    }

    pub fn remove_listener(&self, listener: &Arc<dyn InteractionControlListener>) {
        self.listeners.remove(listener);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.requesters
            .lock()
            .expect("interaction requester mutex poisoned")
    }
}

impl Default for InteractionControlManager {
    fn default() -> Self {
        Self::new()
    }
}
