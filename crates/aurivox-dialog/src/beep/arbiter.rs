use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

/// A competitor for the single playback slot. `activate` fires when the
/// source reaches the front of the arbiter.
pub trait ArbiterSource: Send + Sync {
    fn activate(&self);
}

#[derive(Default)]
struct ArbiterState {
    /// Keyed by (priority, insertion sequence): lower priority value
    /// wins, FIFO among equals. The active source is never stored; it
    /// is the first entry after the last mutation.
    entries: BTreeMap<(u32, u64), Arc<dyn ArbiterSource>>,
    next_seq: u64,
}

/// Serializes competing one-shot sources: the front source is activated,
/// the rest wait until everything ahead of them is removed. There is no
/// preemption; a higher-priority insert waits for the current front to
/// finish.
pub struct PriorityArbiter {
    state: Mutex<ArbiterState>,
}

impl PriorityArbiter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ArbiterState::default()),
        }
    }

    /// Inserts the source; if the arbiter was empty, the source is
    /// activated before this call returns.
    pub fn add_source(&self, priority: u32, source: Arc<dyn ArbiterSource>) {
        let mut state = self.lock();
        let was_empty = state.entries.is_empty();
        let seq = state.next_seq;
        state.next_seq += 1;
        state.entries.insert((priority, seq), Arc::clone(&source));
        debug!(priority, seq, was_empty, "arbiter source added");
        if was_empty {
            source.activate();
        }
    }

    /// Removes the source by identity; absent sources are a silent
    /// no-op. Removing the front activates the next source in line.
    pub fn remove_source(&self, source: &Arc<dyn ArbiterSource>) {
        let mut state = self.lock();
        let Some(key) = state
            .entries
            .iter()
            .find(|(_, s)| Arc::ptr_eq(s, source))
            .map(|(key, _)| *key)
        else {
            return;
        };
        let was_front = state.entries.keys().next() == Some(&key);
        state.entries.remove(&key);
        debug!(priority = key.0, seq = key.1, was_front, "arbiter source removed");
        if was_front {
            if let Some(next) = state.entries.values().next() {
                Arc::clone(next).activate();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ArbiterState> {
        self.state.lock().expect("arbiter mutex poisoned")
    }
}

impl Default for PriorityArbiter {
    fn default() -> Self {
        Self::new()
    }
}
