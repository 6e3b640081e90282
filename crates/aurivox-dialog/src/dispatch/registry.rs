use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use aurivox_core::{BlockingPolicy, DirectiveKey};

use crate::dispatch::DirectiveHandler;
use crate::error::DialogError;

#[derive(Clone)]
pub(crate) struct HandlerEntry {
    pub(crate) handler: Arc<dyn DirectiveHandler>,
    pub(crate) policy: BlockingPolicy,
}

/// Maps directive keys to their handler and blocking policy. One handler
/// per key; agents register all their keys at startup.
pub struct HandlerRegistry {
    entries: RwLock<HashMap<DirectiveKey, HandlerEntry>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn register(
        &self,
        key: DirectiveKey,
        policy: BlockingPolicy,
        handler: Arc<dyn DirectiveHandler>,
    ) -> Result<(), DialogError> {
        let mut entries = self.entries.write().expect("handler registry lock poisoned");
        if entries.contains_key(&key) {
            return Err(DialogError::DuplicateHandler {
                key: key.to_string(),
            });
        }
        entries.insert(key, HandlerEntry { handler, policy });
        Ok(())
    }

    /// Registers one handler under several keys. Nothing is inserted if
    /// any key is already taken.
    pub fn register_bindings(
        &self,
        bindings: Vec<(DirectiveKey, BlockingPolicy)>,
        handler: Arc<dyn DirectiveHandler>,
    ) -> Result<(), DialogError> {
        let mut entries = self.entries.write().expect("handler registry lock poisoned");
        if let Some((key, _)) = bindings.iter().find(|(key, _)| entries.contains_key(key)) {
            return Err(DialogError::DuplicateHandler {
                key: key.to_string(),
            });
        }
        for (key, policy) in bindings {
            entries.insert(
                key,
                HandlerEntry {
                    handler: Arc::clone(&handler),
                    policy,
                },
            );
        }
        Ok(())
    }

    /// Removes the handler for `key`; absent keys are a no-op.
    pub fn unregister(&self, key: &DirectiveKey) -> bool {
        self.entries
            .write()
            .expect("handler registry lock poisoned")
            .remove(key)
            .is_some()
    }

    pub fn is_registered(&self, key: &DirectiveKey) -> bool {
        self.entries
            .read()
            .expect("handler registry lock poisoned")
            .contains_key(key)
    }

    pub(crate) fn resolve(&self, key: &DirectiveKey) -> Option<HandlerEntry> {
        self.entries
            .read()
            .expect("handler registry lock poisoned")
            .get(key)
            .cloned()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
