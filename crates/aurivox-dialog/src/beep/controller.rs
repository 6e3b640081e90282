use std::sync::{Arc, Mutex, Weak};

use tracing::warn;

use aurivox_core::focus::FocusState;

use crate::beep::arbiter::{ArbiterSource, PriorityArbiter};
use crate::focus::{FocusManagerHandle, FocusObserver};

const BEEP_INTERFACE: &str = "Beep";

/// An earcon the controller can play once it wins the playback slot and
/// foreground focus.
pub trait Beep: Send + Sync {
    fn play(&self);
}

struct BeepEntry {
    beep: Arc<dyn Beep>,
    focus: FocusManagerHandle,
    channel: String,
    this: Weak<BeepEntry>,
}

impl ArbiterSource for BeepEntry {
    fn activate(&self) {
        let Some(me) = self.this.upgrade() else {
            return;
        };
        let observer: Arc<dyn FocusObserver> = me;
        match self.focus.acquire_channel(&self.channel, observer, BEEP_INTERFACE) {
            Ok(true) => {}
            Ok(false) => warn!(channel = %self.channel, "beep focus acquire refused"),
            Err(e) => warn!(channel = %self.channel, error = %e, "beep focus acquire failed"),
        }
    }
}

impl FocusObserver for BeepEntry {
    fn on_focus_changed(&self, _channel: &str, state: FocusState) {
        if state == FocusState::Foreground {
            self.beep.play();
        }
    }
}

/// Serializes earcon playback: each requested beep queues in the
/// arbiter, acquires the configured focus channel when it reaches the
/// front, and plays once foreground is granted. The caller reports
/// playback completion via [`BeepPlaybackController::finish_beep`].
pub struct BeepPlaybackController {
    arbiter: PriorityArbiter,
    focus: FocusManagerHandle,
    channel: String,
    active: Mutex<Vec<(Arc<dyn Beep>, Arc<BeepEntry>)>>,
}

impl BeepPlaybackController {
    pub fn new(focus: FocusManagerHandle, channel: impl Into<String>) -> Self {
        Self {
            arbiter: PriorityArbiter::new(),
            focus,
            channel: channel.into(),
            active: Mutex::new(Vec::new()),
        }
    }

    pub fn request_beep(&self, priority: u32, beep: Arc<dyn Beep>) {
        let entry = Arc::new_cyclic(|this| BeepEntry {
            beep: Arc::clone(&beep),
            focus: self.focus.clone(),
            channel: self.channel.clone(),
            this: this.clone(),
        });
        self.lock().push((beep, Arc::clone(&entry)));
        self.arbiter.add_source(priority, entry);
    }

    /// Removes the beep from the arbiter (activating the next one, if it
    /// was playing) and releases its focus. Unknown beeps are a no-op.
    pub fn finish_beep(&self, beep: &Arc<dyn Beep>) {
        let entry = {
            let mut active = self.lock();
            let Some(idx) = active.iter().position(|(b, _)| Arc::ptr_eq(b, beep)) else {
                return;
            };
            active.remove(idx).1
        };
        let source: Arc<dyn ArbiterSource> = entry.clone();
        self.arbiter.remove_source(&source);
        let focus = self.focus.clone();
        let channel = self.channel.clone();
        aurivox_runtime::spawn(async move {
            let observer: Arc<dyn FocusObserver> = entry;
            let _ = focus.release_channel(&channel, &observer).await;
        });
    }

    pub fn pending(&self) -> usize {
        self.arbiter.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Arc<dyn Beep>, Arc<BeepEntry>)>> {
        self.active.lock().expect("beep controller mutex poisoned")
    }
}
