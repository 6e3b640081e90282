//! Context-state assembly.
//!
//! Agents register as context providers keyed by interface name. A
//! snapshot request hands every provider a setter and a token; each
//! provider must call `set_state` exactly once with that token:
//! `Some(json)` with fresh state, or `None` to reuse the cached state
//! from the previous snapshot.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateRequestToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateRefreshPolicy {
    /// Ask the provider on every snapshot.
    #[default]
    Always,
    /// Ask once, then serve the cached state.
    Never,
}

pub trait ContextSetter: Send + Sync {
    fn set_state(&self, token: StateRequestToken, state: Option<String>);
}

pub trait ContextStateProvider: Send + Sync {
    fn refresh_policy(&self) -> StateRefreshPolicy {
        StateRefreshPolicy::Always
    }
    /// Must eventually call `setter.set_state(token, …)` exactly once,
    /// synchronously or from another thread.
    fn provide_state(&self, setter: Arc<dyn ContextSetter>, token: StateRequestToken);
}

struct ProviderSlot {
    provider: Arc<dyn ContextStateProvider>,
    cached: Option<String>,
}

struct CollectingSetter {
    tx: crossbeam_channel::Sender<(StateRequestToken, Option<String>)>,
}

impl ContextSetter for CollectingSetter {
    fn set_state(&self, token: StateRequestToken, state: Option<String>) {
        let _ = self.tx.send((token, state));
    }
}

pub struct ContextManager {
    providers: Mutex<HashMap<String, ProviderSlot>>,
    next_token: AtomicU64,
}

impl ContextManager {
    pub fn new() -> Self {
        Self {
            providers: Mutex::new(HashMap::new()),
            next_token: AtomicU64::new(1),
        }
    }

    pub fn register_provider(
        &self,
        interface_name: &str,
        provider: Arc<dyn ContextStateProvider>,
    ) {
        self.lock().insert(
            interface_name.to_string(),
            ProviderSlot {
                provider,
                cached: None,
            },
        );
    }

    pub fn unregister_provider(&self, interface_name: &str) {
        self.lock().remove(interface_name);
    }

    /// Assembles the full context snapshot as one JSON object keyed by
    /// interface name. Providers answering `None` contribute their
    /// cached state; providers with [`StateRefreshPolicy::Never`] and a
    /// cache are not asked at all.
    pub fn get_context(&self, timeout: Duration) -> Result<String, ClientError> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut states: HashMap<String, Option<String>> = HashMap::new();
        let mut outstanding: HashMap<StateRequestToken, String> = HashMap::new();

        let asked: Vec<(String, Arc<dyn ContextStateProvider>, StateRequestToken)> = {
            let providers = self.lock();
            providers
                .iter()
                .filter_map(|(name, slot)| {
                    if slot.provider.refresh_policy() == StateRefreshPolicy::Never
                        && slot.cached.is_some()
                    {
                        states.insert(name.clone(), slot.cached.clone());
                        return None;
                    }
                    let token =
                        StateRequestToken(self.next_token.fetch_add(1, Ordering::Relaxed));
                    Some((name.clone(), Arc::clone(&slot.provider), token))
                })
                .collect()
        };

        for (name, provider, token) in &asked {
            outstanding.insert(*token, name.clone());
            let setter: Arc<dyn ContextSetter> = Arc::new(CollectingSetter { tx: tx.clone() });
            provider.provide_state(setter, *token);
        }

        let deadline = Instant::now() + timeout;
        while !outstanding.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let Ok((token, state)) = rx.recv_timeout(remaining) else {
                break;
            };
            let Some(name) = outstanding.remove(&token) else {
                // Duplicate or stale token; the exactly-once contract
                // makes this a provider bug, not ours.
                debug!(?token, "ignoring duplicate context state");
                continue;
            };
            let resolved = match state {
                Some(json) => {
                    self.store_state(&name, json.clone());
                    Some(json)
                }
                None => self.cached_state(&name),
            };
            states.insert(name, resolved);
        }

        if !outstanding.is_empty() {
            let mut missing: Vec<String> = outstanding.into_values().collect();
            missing.sort();
            warn!(?missing, "context snapshot incomplete");
            return Err(ClientError::ContextTimeout {
                timeout_ms: timeout.as_millis(),
                missing,
            });
        }

        let mut object = serde_json::Map::new();
        for (name, state) in states {
            let value = match state {
                Some(json) => serde_json::from_str(&json)
                    .unwrap_or(serde_json::Value::String(json)),
                None => serde_json::Value::Null,
            };
            object.insert(name, value);
        }
        Ok(serde_json::Value::Object(object).to_string())
    }

    fn store_state(&self, interface_name: &str, json: String) {
        if let Some(slot) = self.lock().get_mut(interface_name) {
            slot.cached = Some(json);
        }
    }

    /// Cached state from the previous snapshot; the
    /// unchanged-optimization path resolves `None` answers through this.
    fn cached_state(&self, interface_name: &str) -> Option<String> {
        self.lock()
            .get(interface_name)
            .and_then(|slot| slot.cached.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, ProviderSlot>> {
        self.providers
            .lock()
            .expect("context provider mutex poisoned")
    }
}

impl Default for ContextManager {
    fn default() -> Self {
        Self::new()
    }
}
