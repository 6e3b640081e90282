//! Single-shot cancellable timers scheduled on the shared runtime.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// A one-shot timer. The callback fires at most once, after `delay`,
/// unless the deadline is disarmed (or dropped) first.
///
/// Disarming after the callback has already started is a no-op; callers
/// that need to tell a late firing from a cancelled one must check their
/// own state when the callback runs.
pub struct Deadline {
    token: CancellationToken,
}

impl Deadline {
    pub fn arm<F>(delay: Duration, on_fire: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let token = CancellationToken::new();
        let task_token = token.clone();
        crate::spawn(async move {
            tokio::select! {
                _ = task_token.cancelled() => {}
                _ = tokio::time::sleep(delay) => on_fire(),
            }
        });
        Self { token }
    }

    pub fn disarm(&self) {
        self.token.cancel();
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use super::Deadline;

    #[test]
    fn armed_deadline_fires_once() {
        let (tx, rx) = mpsc::channel();
        let deadline = Deadline::arm(Duration::from_millis(20), move || {
            tx.send(()).expect("send fire");
        });
        rx.recv_timeout(Duration::from_millis(500))
            .expect("deadline should fire");
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        drop(deadline);
    }

    #[test]
    fn disarmed_deadline_does_not_fire() {
        let (tx, rx) = mpsc::channel();
        let deadline = Deadline::arm(Duration::from_millis(50), move || {
            let _ = tx.send(());
        });
        deadline.disarm();
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn dropping_a_deadline_disarms_it() {
        let (tx, rx) = mpsc::channel();
        let deadline = Deadline::arm(Duration::from_millis(50), move || {
            let _ = tx.send(());
        });
        drop(deadline);
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }
}
