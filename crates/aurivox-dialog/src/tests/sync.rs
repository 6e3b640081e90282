use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};

use crate::sync::{
    PlaySynchronizerHandle, SyncConfig, SyncGroupSnapshot, SyncObject, SyncRequestListener,
    start_play_synchronizer,
};

const TEST_TIMEOUT: Duration = Duration::from_millis(500);

fn test_synchronizer() -> PlaySynchronizerHandle {
    start_play_synchronizer(SyncConfig {
        command_timeout: TEST_TIMEOUT,
    })
    .expect("failed to start play synchronizer")
}

struct TestObject {
    dialog_request_id: String,
    interface_name: &'static str,
    set_changes: Mutex<Vec<(usize, usize)>>,
}

impl TestObject {
    fn new(dialog_request_id: &str, interface_name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            dialog_request_id: dialog_request_id.to_string(),
            interface_name,
            set_changes: Mutex::new(Vec::new()),
        })
    }

    fn set_changes(&self) -> Vec<(usize, usize)> {
        self.set_changes.lock().expect("object mutex poisoned").clone()
    }
}

impl SyncObject for TestObject {
    fn dialog_request_id(&self) -> &str {
        &self.dialog_request_id
    }

    fn interface_name(&self) -> &str {
        self.interface_name
    }

    fn on_sync_state_changed(
        &self,
        prepared: &[Arc<dyn SyncObject>],
        started: &[Arc<dyn SyncObject>],
    ) {
        self.set_changes
            .lock()
            .expect("object mutex poisoned")
            .push((prepared.len(), started.len()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Granted,
    Denied,
}

struct ChannelListener {
    tx: Sender<Outcome>,
}

impl ChannelListener {
    fn new() -> (Arc<Self>, Receiver<Outcome>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Arc::new(Self { tx }), rx)
    }
}

impl SyncRequestListener for ChannelListener {
    fn on_granted(&self) {
        let _ = self.tx.send(Outcome::Granted);
    }

    fn on_denied(&self) {
        let _ = self.tx.send(Outcome::Denied);
    }
}

fn snapshot(handle: &PlaySynchronizerHandle, id: &str) -> Option<SyncGroupSnapshot> {
    handle.group_snapshot(id).expect("failed to call snapshot")
}

fn expect_outcome(rx: &Receiver<Outcome>) -> Outcome {
    rx.recv_timeout(TEST_TIMEOUT).expect("no sync outcome arrived")
}

#[test]
fn start_requires_prepare() {
    let synchronizer = test_synchronizer();
    let object = TestObject::new("dlg-1", "Tts");
    let (listener, rx) = ChannelListener::new();

    synchronizer
        .start_sync(object, listener)
        .expect("failed to cast start");
    assert_eq!(expect_outcome(&rx), Outcome::Denied);
    synchronizer.shutdown().expect("failed to shutdown");
}

#[test]
fn prepared_object_starts_and_is_granted() {
    let synchronizer = test_synchronizer();
    let object = TestObject::new("dlg-1", "Tts");
    let (listener, rx) = ChannelListener::new();

    synchronizer
        .prepare_sync(object.clone())
        .expect("failed to cast prepare");
    synchronizer
        .start_sync(object.clone(), listener.clone())
        .expect("failed to cast start");
    assert_eq!(expect_outcome(&rx), Outcome::Granted);

    // Idempotent second start.
    synchronizer
        .start_sync(object, listener)
        .expect("failed to cast start");
    assert_eq!(expect_outcome(&rx), Outcome::Granted);

    let group = snapshot(&synchronizer, "dlg-1").expect("group missing");
    assert_eq!(group.started, vec!["Tts".to_string()]);
    synchronizer.shutdown().expect("failed to shutdown");
}

#[test]
fn cooperative_release_waits_for_every_member() {
    let synchronizer = test_synchronizer();
    let tts = TestObject::new("dlg-1", "Tts");
    let card = TestObject::new("dlg-1", "Display");
    let (start_listener, start_rx) = ChannelListener::new();
    let (tts_release, tts_rx) = ChannelListener::new();
    let (card_release, card_rx) = ChannelListener::new();

    synchronizer.prepare_sync(tts.clone()).expect("failed to cast prepare");
    synchronizer.prepare_sync(card.clone()).expect("failed to cast prepare");
    synchronizer
        .start_sync(tts.clone(), start_listener.clone())
        .expect("failed to cast start");
    synchronizer
        .start_sync(card.clone(), start_listener)
        .expect("failed to cast start");
    assert_eq!(expect_outcome(&start_rx), Outcome::Granted);
    assert_eq!(expect_outcome(&start_rx), Outcome::Granted);

    synchronizer
        .release_sync(tts.clone(), tts_release)
        .expect("failed to cast release");
    let group = snapshot(&synchronizer, "dlg-1").expect("group dissolved too early");
    assert_eq!(group.started, vec!["Display".to_string()]);
    assert_eq!(group.pending_release, vec!["Tts".to_string()]);
    assert!(
        tts_rx.recv_timeout(Duration::from_millis(50)).is_err(),
        "release granted before the sibling agreed"
    );

    synchronizer
        .release_sync(card.clone(), card_release)
        .expect("failed to cast release");
    assert_eq!(expect_outcome(&tts_rx), Outcome::Granted);
    assert_eq!(expect_outcome(&card_rx), Outcome::Granted);
    assert!(snapshot(&synchronizer, "dlg-1").is_none());
    synchronizer.shutdown().expect("failed to shutdown");
}

#[test]
fn cancel_removes_every_member_of_the_turn() {
    let synchronizer = test_synchronizer();
    let tts = TestObject::new("dlg-1", "Tts");
    let card = TestObject::new("dlg-1", "Display");
    let (listener, rx) = ChannelListener::new();

    synchronizer.prepare_sync(tts.clone()).expect("failed to cast prepare");
    synchronizer.prepare_sync(card.clone()).expect("failed to cast prepare");
    synchronizer
        .start_sync(tts, listener.clone())
        .expect("failed to cast start");
    synchronizer
        .start_sync(card, listener)
        .expect("failed to cast start");
    assert_eq!(expect_outcome(&rx), Outcome::Granted);
    assert_eq!(expect_outcome(&rx), Outcome::Granted);

    synchronizer.cancel_sync("dlg-1").expect("failed to cast cancel");
    assert!(snapshot(&synchronizer, "dlg-1").is_none());
    synchronizer.shutdown().expect("failed to shutdown");
}

#[test]
fn release_of_sole_member_is_immediate() {
    let synchronizer = test_synchronizer();
    let object = TestObject::new("dlg-1", "Tts");
    let (start_listener, start_rx) = ChannelListener::new();
    let (release_listener, release_rx) = ChannelListener::new();

    synchronizer.prepare_sync(object.clone()).expect("failed to cast prepare");
    synchronizer
        .start_sync(object.clone(), start_listener)
        .expect("failed to cast start");
    assert_eq!(expect_outcome(&start_rx), Outcome::Granted);

    synchronizer
        .release_sync(object, release_listener)
        .expect("failed to cast release");
    assert_eq!(expect_outcome(&release_rx), Outcome::Granted);
    assert!(snapshot(&synchronizer, "dlg-1").is_none());
    synchronizer.shutdown().expect("failed to shutdown");
}

#[test]
fn immediate_release_skips_the_negotiation() {
    let synchronizer = test_synchronizer();
    let tts = TestObject::new("dlg-1", "Tts");
    let card = TestObject::new("dlg-1", "Display");
    let (start_listener, start_rx) = ChannelListener::new();
    let (release_listener, release_rx) = ChannelListener::new();

    synchronizer.prepare_sync(tts.clone()).expect("failed to cast prepare");
    synchronizer.prepare_sync(card.clone()).expect("failed to cast prepare");
    synchronizer
        .start_sync(tts.clone(), start_listener.clone())
        .expect("failed to cast start");
    synchronizer
        .start_sync(card.clone(), start_listener)
        .expect("failed to cast start");
    assert_eq!(expect_outcome(&start_rx), Outcome::Granted);
    assert_eq!(expect_outcome(&start_rx), Outcome::Granted);

    synchronizer
        .release_sync_immediately(tts, release_listener)
        .expect("failed to cast release");
    assert_eq!(expect_outcome(&release_rx), Outcome::Granted);

    let group = snapshot(&synchronizer, "dlg-1").expect("group missing");
    assert_eq!(group.started, vec!["Display".to_string()]);
    assert!(group.pending_release.is_empty());
    synchronizer.shutdown().expect("failed to shutdown");
}

#[test]
fn release_of_unknown_object_is_denied() {
    let synchronizer = test_synchronizer();
    let object = TestObject::new("dlg-1", "Tts");
    let (listener, rx) = ChannelListener::new();

    synchronizer
        .release_sync(object, listener)
        .expect("failed to cast release");
    assert_eq!(expect_outcome(&rx), Outcome::Denied);
    synchronizer.shutdown().expect("failed to shutdown");
}

#[test]
fn set_changes_are_broadcast_to_remaining_members() {
    let synchronizer = test_synchronizer();
    let tts = TestObject::new("dlg-1", "Tts");
    let card = TestObject::new("dlg-1", "Display");
    let (listener, rx) = ChannelListener::new();

    synchronizer.prepare_sync(tts.clone()).expect("failed to cast prepare");
    synchronizer.prepare_sync(card.clone()).expect("failed to cast prepare");
    synchronizer
        .start_sync(tts.clone(), listener.clone())
        .expect("failed to cast start");
    assert_eq!(expect_outcome(&rx), Outcome::Granted);

    synchronizer
        .release_sync(tts, listener)
        .expect("failed to cast release");
    // Barrier so all casts above have been handled.
    let _ = snapshot(&synchronizer, "dlg-1");

    // Card saw: itself prepared alongside tts (2,0), tts started (1,1),
    // tts release-requested (1,0).
    assert_eq!(card.set_changes(), vec![(2, 0), (1, 1), (1, 0)]);
    synchronizer.shutdown().expect("failed to shutdown");
}
