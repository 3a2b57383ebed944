//! Integration tests for the task list lifecycle.
//!
//! Drives `TaskListController` through add, remove, and toggle against an
//! in-memory store and checks the list, the subscriber notifications, and
//! the persisted slot after each step.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use termtodo::store::InMemoryStore;
use termtodo::tasks::TaskListController;
use termtodo_proto::{TaskList, codec};

const KEY: &str = "todos";

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Opens a controller with write-through persistence to a fresh store.
fn open_with_store() -> (TaskListController, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let (ctl, _status) = TaskListController::open(Arc::clone(&store), KEY);
    (ctl, store)
}

/// Decodes whatever the store currently holds under `KEY`.
fn stored(store: &InMemoryStore) -> TaskList {
    codec::decode(&store.get(KEY).expect("slot should be written")).unwrap()
}

/// Registers a subscriber that records every published list length.
fn record_lengths(ctl: &mut TaskListController) -> Rc<RefCell<Vec<usize>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    ctl.subscribe(move |list| sink.borrow_mut().push(list.len()));
    seen
}

// ---------------------------------------------------------------------------
// Adding
// ---------------------------------------------------------------------------

#[test]
fn blank_text_is_ignored() {
    let (mut ctl, store) = open_with_store();
    assert!(ctl.add("").is_none());
    assert!(ctl.add("   ").is_none());
    assert!(ctl.add("\t\n").is_none());
    assert!(ctl.tasks().is_empty());
    assert_eq!(store.write_count(), 0, "no-op must not write");
}

#[test]
fn add_appends_open_task_with_trimmed_text() {
    let (mut ctl, store) = open_with_store();
    let id = ctl.add("  Buy milk ").unwrap();

    let tasks = ctl.tasks();
    assert_eq!(tasks.len(), 1);
    let task = tasks.find(id).unwrap();
    assert_eq!(task.text, "Buy milk");
    assert!(!task.is_complete);
    assert_eq!(stored(&store), *tasks);
}

#[test]
fn rapid_adds_get_unique_increasing_ids() {
    let (mut ctl, _store) = open_with_store();
    let ids: Vec<_> = (0..200).map(|i| ctl.add(&format!("task {i}")).unwrap()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ctl.tasks().len(), 200);
}

// ---------------------------------------------------------------------------
// Removing and toggling
// ---------------------------------------------------------------------------

#[test]
fn remove_present_id_shrinks_list() {
    let (mut ctl, store) = open_with_store();
    let a = ctl.add("A").unwrap();
    let b = ctl.add("B").unwrap();

    assert!(ctl.remove(a));
    let tasks = ctl.tasks();
    assert_eq!(tasks.len(), 1);
    assert!(!tasks.contains(a));
    assert!(tasks.contains(b));
    assert_eq!(stored(&store), *tasks);
}

#[test]
fn remove_absent_id_changes_nothing() {
    let (mut ctl, store) = open_with_store();
    let a = ctl.add("A").unwrap();
    ctl.remove(a);
    let before = ctl.tasks();
    let writes = store.write_count();

    assert!(!ctl.remove(a));
    assert!(Arc::ptr_eq(&before, &ctl.tasks()));
    assert_eq!(store.write_count(), writes);
}

#[test]
fn toggle_twice_restores_flag_and_leaves_others() {
    let (mut ctl, _store) = open_with_store();
    let a = ctl.add("A").unwrap();
    let b = ctl.add("B").unwrap();
    let before = ctl.tasks();

    assert_eq!(ctl.toggle(a), Some(true));
    assert!(!ctl.tasks().find(b).unwrap().is_complete);
    assert_eq!(ctl.toggle(a), Some(false));
    assert_eq!(*ctl.tasks(), *before);
}

#[test]
fn toggle_unknown_id_is_noop() {
    let (mut ctl, _store) = open_with_store();
    let a = ctl.add("A").unwrap();
    ctl.remove(a);
    let seen = record_lengths(&mut ctl);
    assert_eq!(ctl.toggle(a), None);
    assert!(seen.borrow().is_empty());
}

// ---------------------------------------------------------------------------
// End-to-end scenario
// ---------------------------------------------------------------------------

#[test]
fn add_add_toggle_remove_scenario() {
    let (mut ctl, store) = open_with_store();
    let a = ctl.add("A").unwrap();
    let b = ctl.add("B").unwrap();
    ctl.toggle(a);
    ctl.remove(b);

    let tasks = ctl.tasks();
    assert_eq!(tasks.len(), 1);
    let only = tasks.get(0).unwrap();
    assert_eq!(only.id, a);
    assert_eq!(only.text, "A");
    assert!(only.is_complete);

    assert_eq!(store.write_count(), 4);
    assert_eq!(stored(&store), *tasks);
}

// ---------------------------------------------------------------------------
// Subscribers
// ---------------------------------------------------------------------------

#[test]
fn subscribers_run_once_per_change_in_registration_order() {
    let mut ctl = TaskListController::default();
    let order = Rc::new(RefCell::new(Vec::new()));
    for name in ["first", "second", "third"] {
        let sink = Rc::clone(&order);
        ctl.subscribe(move |_| sink.borrow_mut().push(name));
    }

    ctl.add("A");
    assert_eq!(*order.borrow(), ["first", "second", "third"]);
}

#[test]
fn unsubscribed_callback_stops_running() {
    let mut ctl = TaskListController::default();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let sub = ctl.subscribe(move |_| *sink.borrow_mut() += 1);

    ctl.add("A");
    assert!(ctl.unsubscribe(sub));
    ctl.add("B");
    assert_eq!(*count.borrow(), 1);
    assert!(!ctl.unsubscribe(sub));
}

#[test]
fn subscriber_sees_the_published_snapshot() {
    let mut ctl = TaskListController::default();
    let seen = record_lengths(&mut ctl);
    let a = ctl.add("A").unwrap();
    ctl.add("B");
    ctl.toggle(a);
    ctl.remove(a);
    assert_eq!(*seen.borrow(), [1, 2, 2, 1]);
}
