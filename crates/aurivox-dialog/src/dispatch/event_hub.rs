use tokio::sync::broadcast;

use crate::dispatch::events::DispatchEvent;

pub(crate) struct EventHub {
    tx: broadcast::Sender<DispatchEvent>,
}

impl EventHub {
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<DispatchEvent> {
        self.tx.subscribe()
    }

    pub(crate) fn emit(&self, event: DispatchEvent) {
        let _ = self.tx.send(event);
    }
}
