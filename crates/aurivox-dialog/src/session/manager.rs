use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use tracing::debug;

use aurivox_core::Session;

struct SessionEntry {
    session: Option<Session>,
    requesters: HashSet<String>,
    /// Creation order, for [`SessionManager::active_sessions`].
    order: u64,
}

#[derive(Default)]
struct SessionTable {
    entries: HashMap<String, SessionEntry>,
    next_order: u64,
}

impl SessionTable {
    fn entry_mut(&mut self, dialog_request_id: &str) -> &mut SessionEntry {
        let order = self.next_order;
        let entry = self
            .entries
            .entry(dialog_request_id.to_string())
            .or_insert_with(|| SessionEntry {
                session: None,
                requesters: HashSet::new(),
                order,
            });
        if entry.order == order {
            self.next_order += 1;
        }
        entry
    }
}

/// Tracks server-issued sessions per dialog request id. Activation is
/// reference-counted per requester; the entry is dropped when the last
/// requester deactivates.
pub struct SessionManager {
    table: Mutex<SessionTable>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(SessionTable::default()),
        }
    }

    /// Stores the session delivered for a dialog turn.
    pub fn set(&self, dialog_request_id: &str, session: Session) {
        let mut table = self.lock();
        let entry = table.entry_mut(dialog_request_id);
        debug!(dialog_request_id, session_id = %session.session_id, "session set");
        entry.session = Some(session);
    }

    /// Marks the session active for `requester`. Idempotent per
    /// requester.
    pub fn activate(&self, dialog_request_id: &str, requester: &str) {
        let mut table = self.lock();
        let entry = table.entry_mut(dialog_request_id);
        if entry.requesters.insert(requester.to_string()) {
            debug!(dialog_request_id, requester, "session activated");
        }
    }

    /// Removes `requester`'s activation; the entry is dropped once no
    /// requester remains. Unknown ids and repeated deactivation are
    /// no-ops.
    pub fn deactivate(&self, dialog_request_id: &str, requester: &str) {
        let mut table = self.lock();
        let Some(entry) = table.entries.get_mut(dialog_request_id) else {
            return;
        };
        if entry.requesters.remove(requester) {
            debug!(dialog_request_id, requester, "session deactivated");
        }
        if entry.requesters.is_empty() {
            table.entries.remove(dialog_request_id);
        }
    }

    /// Sessions with at least one active requester, in first-activation
    /// order.
    pub fn active_sessions(&self) -> Vec<Session> {
        let table = self.lock();
        let mut active: Vec<(u64, &Session)> = table
            .entries
            .values()
            .filter(|e| !e.requesters.is_empty())
            .filter_map(|e| e.session.as_ref().map(|s| (e.order, s)))
            .collect();
        active.sort_by_key(|(order, _)| *order);
        active.into_iter().map(|(_, s)| s.clone()).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionTable> {
        self.table.lock().expect("session table mutex poisoned")
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
