use std::sync::{Arc, Mutex};

use crate::beep::{ArbiterSource, PriorityArbiter};

struct RecordingSource {
    name: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl ArbiterSource for RecordingSource {
    fn activate(&self) {
        self.log.lock().expect("log mutex poisoned").push(self.name);
    }
}

fn source(name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Arc<dyn ArbiterSource> {
    Arc::new(RecordingSource {
        name,
        log: Arc::clone(log),
    })
}

fn activations(log: &Arc<Mutex<Vec<&'static str>>>) -> Vec<&'static str> {
    log.lock().expect("log mutex poisoned").clone()
}

#[test]
fn first_insert_activates_immediately() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let arbiter = PriorityArbiter::new();
    arbiter.add_source(1, source("a", &log));
    assert_eq!(activations(&log), vec!["a"]);
}

#[test]
fn equal_priority_is_served_fifo_and_removal_is_idempotent() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let arbiter = PriorityArbiter::new();
    let a = source("a", &log);
    let b = source("b", &log);

    arbiter.add_source(1, Arc::clone(&a));
    arbiter.add_source(1, Arc::clone(&b));
    assert_eq!(activations(&log), vec!["a"]);

    arbiter.remove_source(&a);
    assert_eq!(activations(&log), vec!["a", "b"]);

    arbiter.remove_source(&a);
    assert_eq!(activations(&log), vec!["a", "b"]);
    assert_eq!(arbiter.len(), 1);
}

#[test]
fn higher_precedence_insert_does_not_preempt() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let arbiter = PriorityArbiter::new();
    let a = source("a", &log);
    let b = source("b", &log);

    arbiter.add_source(5, Arc::clone(&a));
    arbiter.add_source(1, Arc::clone(&b));
    assert_eq!(activations(&log), vec!["a"]);

    arbiter.remove_source(&a);
    assert_eq!(activations(&log), vec!["a", "b"]);
}

#[test]
fn removing_a_waiting_source_does_not_activate_anything() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let arbiter = PriorityArbiter::new();
    let a = source("a", &log);
    let b = source("b", &log);
    let c = source("c", &log);

    arbiter.add_source(1, Arc::clone(&a));
    arbiter.add_source(2, Arc::clone(&b));
    arbiter.add_source(3, Arc::clone(&c));
    arbiter.remove_source(&b);
    assert_eq!(activations(&log), vec!["a"]);

    arbiter.remove_source(&a);
    assert_eq!(activations(&log), vec!["a", "c"]);
}

#[test]
fn waiting_sources_activate_in_priority_then_fifo_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let arbiter = PriorityArbiter::new();
    let a = source("a", &log);
    let b = source("b", &log);
    let c = source("c", &log);

    arbiter.add_source(1, Arc::clone(&a));
    arbiter.add_source(3, Arc::clone(&b));
    arbiter.add_source(2, Arc::clone(&c));
    assert_eq!(activations(&log), vec!["a"]);

    arbiter.remove_source(&a);
    assert_eq!(activations(&log), vec!["a", "c"]);

    arbiter.remove_source(&c);
    assert_eq!(activations(&log), vec!["a", "c", "b"]);
    assert!(!arbiter.is_empty());
}
