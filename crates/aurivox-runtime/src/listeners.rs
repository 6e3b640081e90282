//! Copy-on-write listener registries.
//!
//! Broadcast iterates a snapshot, so listeners may add or remove
//! registrations (including themselves) from inside a notification
//! without deadlocking or invalidating the iteration.

use std::sync::{Arc, Mutex};

pub struct Listeners<T: ?Sized> {
    inner: Mutex<Arc<Vec<Arc<T>>>>,
}

impl<T: ?Sized> Listeners<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Arc::new(Vec::new())),
        }
    }

    pub fn add(&self, listener: Arc<T>) {
        let mut current = self.lock();
        let mut next = current.as_ref().clone();
        next.push(listener);
        *current = Arc::new(next);
    }

    /// Removes a listener by identity. Removing one that was never added
    /// (or was already removed) is a no-op.
    pub fn remove(&self, listener: &Arc<T>) {
        let mut current = self.lock();
        if !current.iter().any(|l| Arc::ptr_eq(l, listener)) {
            return;
        }
        let next = current
            .iter()
            .filter(|l| !Arc::ptr_eq(l, listener))
            .cloned()
            .collect::<Vec<_>>();
        *current = Arc::new(next);
    }

    pub fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        Arc::clone(&self.lock())
    }

    pub fn notify(&self, mut f: impl FnMut(&T)) {
        for listener in self.snapshot().iter() {
            f(listener.as_ref());
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Arc<Vec<Arc<T>>>> {
        self.inner.lock().expect("listener registry mutex poisoned")
    }
}

impl<T: ?Sized> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}
