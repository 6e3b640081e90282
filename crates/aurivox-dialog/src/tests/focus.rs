use std::sync::{Arc, Mutex};
use std::time::Duration;

use aurivox_core::focus::{CHANNEL_ALERTS, CHANNEL_CONTENT, CHANNEL_DIALOG, FocusState};

use crate::focus::{FocusConfig, FocusListener, FocusManagerHandle, FocusObserver, start_focus_manager};

const TEST_TIMEOUT: Duration = Duration::from_millis(500);

fn test_manager() -> FocusManagerHandle {
    start_focus_manager(FocusConfig {
        command_timeout: TEST_TIMEOUT,
        ..FocusConfig::default()
    })
    .expect("failed to start focus manager")
}

struct RecordingObserver {
    transitions: Mutex<Vec<(String, FocusState)>>,
}

impl RecordingObserver {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            transitions: Mutex::new(Vec::new()),
        })
    }

    fn transitions(&self) -> Vec<(String, FocusState)> {
        self.transitions.lock().expect("observer mutex poisoned").clone()
    }

    fn last_state(&self) -> Option<FocusState> {
        self.transitions().last().map(|(_, state)| *state)
    }
}

impl FocusObserver for RecordingObserver {
    fn on_focus_changed(&self, channel: &str, state: FocusState) {
        self.transitions
            .lock()
            .expect("observer mutex poisoned")
            .push((channel.to_string(), state));
    }
}

#[test]
fn sole_holder_is_granted_foreground() {
    let manager = test_manager();
    let observer = RecordingObserver::new();
    let granted = manager
        .acquire_channel(CHANNEL_DIALOG, observer.clone(), "Asr")
        .expect("failed to call acquire");
    assert!(granted);
    assert_eq!(
        observer.transitions(),
        vec![(CHANNEL_DIALOG.to_string(), FocusState::Foreground)]
    );
    manager.shutdown().expect("failed to shutdown");
}

#[test]
fn unknown_channel_is_refused() {
    let manager = test_manager();
    let observer = RecordingObserver::new();
    let granted = manager
        .acquire_channel("no-such-channel", observer.clone(), "Asr")
        .expect("failed to call acquire");
    assert!(!granted);
    assert!(observer.transitions().is_empty());
    manager.shutdown().expect("failed to shutdown");
}

#[test]
fn higher_priority_acquisition_downgrades_the_holder() {
    let manager = test_manager();
    let content = RecordingObserver::new();
    let dialog = RecordingObserver::new();

    manager
        .acquire_channel(CHANNEL_CONTENT, content.clone(), "AudioPlayer")
        .expect("failed to call acquire");
    assert_eq!(content.last_state(), Some(FocusState::Foreground));

    manager
        .acquire_channel(CHANNEL_DIALOG, dialog.clone(), "Tts")
        .expect("failed to call acquire");
    assert_eq!(content.last_state(), Some(FocusState::Background));
    assert_eq!(dialog.last_state(), Some(FocusState::Foreground));
    manager.shutdown().expect("failed to shutdown");
}

#[test]
fn release_promotes_the_next_highest_priority_holder() {
    let manager = test_manager();
    let content = RecordingObserver::new();
    let dialog = RecordingObserver::new();

    manager
        .acquire_channel(CHANNEL_CONTENT, content.clone(), "AudioPlayer")
        .expect("failed to call acquire");
    manager
        .acquire_channel(CHANNEL_DIALOG, dialog.clone(), "Tts")
        .expect("failed to call acquire");

    let dialog_observer: Arc<dyn FocusObserver> = dialog.clone();
    let released = aurivox_runtime::block_on(
        manager.release_channel(CHANNEL_DIALOG, &dialog_observer),
    )
    .expect("failed to call release");
    assert!(released);
    assert_eq!(dialog.last_state(), Some(FocusState::None));
    assert_eq!(content.last_state(), Some(FocusState::Foreground));
    manager.shutdown().expect("failed to shutdown");
}

#[test]
fn releasing_an_unheld_channel_resolves_false() {
    let manager = test_manager();
    let observer: Arc<dyn FocusObserver> = RecordingObserver::new();
    let released = aurivox_runtime::block_on(manager.release_channel(CHANNEL_DIALOG, &observer))
        .expect("failed to call release");
    assert!(!released);
    manager.shutdown().expect("failed to shutdown");
}

#[test]
fn acquiring_a_held_channel_displaces_the_previous_holder() {
    let manager = test_manager();
    let first = RecordingObserver::new();
    let second = RecordingObserver::new();

    manager
        .acquire_channel(CHANNEL_DIALOG, first.clone(), "Asr")
        .expect("failed to call acquire");
    manager
        .acquire_channel(CHANNEL_DIALOG, second.clone(), "Tts")
        .expect("failed to call acquire");

    assert_eq!(first.last_state(), Some(FocusState::None));
    assert_eq!(second.last_state(), Some(FocusState::Foreground));

    let snapshot = manager.snapshot().expect("failed to call snapshot");
    let dialog = snapshot
        .iter()
        .find(|info| info.channel == CHANNEL_DIALOG)
        .expect("dialog channel missing");
    assert_eq!(dialog.interface_name.as_deref(), Some("Tts"));
    assert_eq!(dialog.state, FocusState::Foreground);
    manager.shutdown().expect("failed to shutdown");
}

#[test]
fn foreground_grant_arrives_after_the_downgrade() {
    let manager = test_manager();
    let order: Arc<Mutex<Vec<(String, FocusState)>>> = Arc::new(Mutex::new(Vec::new()));

    struct OrderListener {
        order: Arc<Mutex<Vec<(String, FocusState)>>>,
    }
    impl FocusListener for OrderListener {
        fn on_focus_transition(&self, channel: &str, _interface_name: &str, state: FocusState) {
            self.order
                .lock()
                .expect("order mutex poisoned")
                .push((channel.to_string(), state));
        }
    }

    manager
        .add_listener(Arc::new(OrderListener {
            order: Arc::clone(&order),
        }))
        .expect("failed to add listener");

    let content = RecordingObserver::new();
    let alerts = RecordingObserver::new();
    manager
        .acquire_channel(CHANNEL_CONTENT, content, "AudioPlayer")
        .expect("failed to call acquire");
    manager
        .acquire_channel(CHANNEL_ALERTS, alerts, "Alerts")
        .expect("failed to call acquire");

    let transitions = order.lock().expect("order mutex poisoned").clone();
    assert_eq!(
        transitions,
        vec![
            (CHANNEL_CONTENT.to_string(), FocusState::Foreground),
            (CHANNEL_CONTENT.to_string(), FocusState::Background),
            (CHANNEL_ALERTS.to_string(), FocusState::Foreground),
        ]
    );
    manager.shutdown().expect("failed to shutdown");
}

#[test]
fn removed_listener_stops_observing() {
    let manager = test_manager();
    let order: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    struct NameListener {
        order: Arc<Mutex<Vec<String>>>,
    }
    impl FocusListener for NameListener {
        fn on_focus_transition(&self, channel: &str, _interface_name: &str, _state: FocusState) {
            self.order
                .lock()
                .expect("order mutex poisoned")
                .push(channel.to_string());
        }
    }

    let listener: Arc<dyn FocusListener> = Arc::new(NameListener {
        order: Arc::clone(&order),
    });
    manager.add_listener(Arc::clone(&listener)).expect("failed to add listener");

    let observer = RecordingObserver::new();
    manager
        .acquire_channel(CHANNEL_DIALOG, observer.clone(), "Asr")
        .expect("failed to call acquire");
    manager
        .remove_listener(&listener)
        .expect("failed to remove listener");
    let dialog_observer: Arc<dyn FocusObserver> = observer;
    aurivox_runtime::block_on(manager.release_channel(CHANNEL_DIALOG, &dialog_observer))
        .expect("failed to call release");

    assert_eq!(order.lock().expect("order mutex poisoned").len(), 1);
    manager.shutdown().expect("failed to shutdown");
}
