use std::sync::Arc;

use tracing::{debug, warn};

use aurivox_core::focus::{ChannelConfiguration, FocusState};
use aurivox_runtime::listeners::Listeners;

use crate::focus::{ChannelFocusInfo, FocusListener, FocusObserver};

pub(crate) struct FocusActor {
    channels: Vec<ChannelSlot>,
    listeners: Listeners<dyn FocusListener>,
}

struct ChannelSlot {
    config: ChannelConfiguration,
    holder: Option<Holder>,
}

struct Holder {
    observer: Arc<dyn FocusObserver>,
    interface_name: String,
    state: FocusState,
}

impl FocusActor {
    pub(crate) fn new(channels: Vec<ChannelConfiguration>) -> Self {
        Self {
            channels: channels
                .into_iter()
                .map(|config| ChannelSlot {
                    config,
                    holder: None,
                })
                .collect(),
            listeners: Listeners::new(),
        }
    }

    pub(crate) fn acquire(
        &mut self,
        channel: &str,
        observer: Arc<dyn FocusObserver>,
        interface_name: &str,
    ) -> bool {
        let Some(idx) = self.channel_index(channel) else {
            warn!(channel, interface_name, "acquire on unknown channel");
            return false;
        };

        let displaced = self.channels[idx]
            .holder
            .as_ref()
            .is_some_and(|h| !Arc::ptr_eq(&h.observer, &observer));
        if displaced {
            self.transition(idx, FocusState::None);
        }
        debug!(channel, interface_name, displaced, "acquire channel");

        let slot = &mut self.channels[idx];
        match &mut slot.holder {
            Some(holder) => holder.interface_name = interface_name.to_string(),
            None => {
                slot.holder = Some(Holder {
                    observer,
                    interface_name: interface_name.to_string(),
                    state: FocusState::None,
                });
            }
        }
        self.recompute();
        true
    }

    pub(crate) fn release(&mut self, channel: &str, observer: &Arc<dyn FocusObserver>) -> bool {
        let Some(idx) = self.channel_index(channel) else {
            return false;
        };
        let holds = self.channels[idx]
            .holder
            .as_ref()
            .is_some_and(|h| Arc::ptr_eq(&h.observer, observer));
        if !holds {
            return false;
        }
        debug!(channel, "release channel");
        self.transition(idx, FocusState::None);
        self.channels[idx].holder = None;
        self.recompute();
        true
    }

    pub(crate) fn add_listener(&mut self, listener: Arc<dyn FocusListener>) {
        self.listeners.add(listener);
    }

    pub(crate) fn remove_listener(&mut self, listener: &Arc<dyn FocusListener>) {
        self.listeners.remove(listener);
    }

    pub(crate) fn snapshot(&self) -> Vec<ChannelFocusInfo> {
        self.channels
            .iter()
            .map(|slot| ChannelFocusInfo {
                channel: slot.config.name.clone(),
                interface_name: slot.holder.as_ref().map(|h| h.interface_name.clone()),
                state: slot
                    .holder
                    .as_ref()
                    .map(|h| h.state)
                    .unwrap_or(FocusState::None),
            })
            .collect()
    }

    fn channel_index(&self, channel: &str) -> Option<usize> {
        self.channels.iter().position(|s| s.config.name == channel)
    }

    /// Reassigns focus levels across all held channels: the holder of the
    /// top-ranked held channel gets foreground, everyone else background.
    /// Downgrades are delivered before the foreground grant so two
    /// observers never believe they are foreground at once.
    fn recompute(&mut self) {
        let mut top: Option<usize> = None;
        for (idx, slot) in self.channels.iter().enumerate() {
            if slot.holder.is_none() {
                continue;
            }
            top = match top {
                Some(best) if !slot.config.outranks(&self.channels[best].config) => Some(best),
                _ => Some(idx),
            };
        }

        let held: Vec<usize> = (0..self.channels.len())
            .filter(|&idx| self.channels[idx].holder.is_some())
            .collect();
        for &idx in &held {
            if Some(idx) != top {
                self.transition(idx, FocusState::Background);
            }
        }
        if let Some(idx) = top {
            self.transition(idx, FocusState::Foreground);
        }
    }

    /// Applies one focus transition and notifies exactly once; a no-op if
    /// the holder is absent or already in `next`.
    fn transition(&mut self, idx: usize, next: FocusState) {
        let slot = &mut self.channels[idx];
        let Some(holder) = slot.holder.as_mut() else {
            return;
        };
        if holder.state == next {
            return;
        }
        holder.state = next;
        let channel = slot.config.name.clone();
        let interface_name = holder.interface_name.clone();
        let observer = Arc::clone(&holder.observer);
        debug!(channel = %channel, interface = %interface_name, state = ?next, "focus transition");
        observer.on_focus_changed(&channel, next);
        self.listeners
            .notify(|l| l.on_focus_transition(&channel, &interface_name, next));
    }
}
