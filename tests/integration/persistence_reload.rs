//! Integration tests for persisting the task list to disk and reading it
//! back on the next start.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;

use termtodo::store::{FileStore, KeyValueStore};
use termtodo::tasks::{LoadError, TaskListController};
use termtodo_proto::codec::CodecError;

const KEY: &str = "todos";

// ---------------------------------------------------------------------------
// Reload
// ---------------------------------------------------------------------------

#[test]
fn reopening_reproduces_the_list() {
    let dir = tempfile::tempdir().unwrap();

    let (mut ctl, status) = TaskListController::open(FileStore::new(dir.path()), KEY);
    let a = ctl.add("Buy milk").unwrap();
    ctl.add("Walk the dog");
    ctl.toggle(a);
    let saved = ctl.tasks();
    assert_eq!(status.writes(), 3);
    assert!(status.last_error().is_none());
    drop(ctl);

    let (reopened, _) = TaskListController::open(FileStore::new(dir.path()), KEY);
    assert_eq!(*reopened.tasks(), *saved);
}

#[test]
fn slot_is_a_json_array_of_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let (mut ctl, _) = TaskListController::open(FileStore::new(dir.path()), KEY);
    let id = ctl.add("Buy milk").unwrap();

    let raw = fs::read_to_string(dir.path().join("todos.json")).unwrap();
    assert_eq!(
        raw,
        format!(r#"[{{"id":{id},"text":"Buy milk","isComplete":false}}]"#)
    );
}

#[test]
fn ids_keep_increasing_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let far_future = u64::MAX / 2;
    let store = FileStore::new(dir.path());
    store
        .save(
            KEY,
            &format!(r#"[{{"id":{far_future},"text":"old","isComplete":true}}]"#),
        )
        .unwrap();

    let (mut ctl, _) = TaskListController::open(FileStore::new(dir.path()), KEY);
    let id = ctl.add("new").unwrap();
    assert!(id.as_u64() > far_future);
}

#[test]
fn missing_slot_starts_empty_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let (ctl, status) = TaskListController::open(FileStore::new(dir.path()), KEY);
    assert!(ctl.tasks().is_empty());
    assert_eq!(status.writes(), 0);
    assert!(!dir.path().join("todos.json").exists());
}

#[test]
fn keys_are_separate_slots() {
    let dir = tempfile::tempdir().unwrap();
    let (mut work, _) = TaskListController::open(FileStore::new(dir.path()), "work");
    work.add("Ship it");

    let (home, _) = TaskListController::open(FileStore::new(dir.path()), "home");
    assert!(home.tasks().is_empty());
}

// ---------------------------------------------------------------------------
// Corrupt content
// ---------------------------------------------------------------------------

#[test]
fn corrupt_slot_resets_when_lenient() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("todos.json"), "{not json").unwrap();

    let (mut ctl, _) = TaskListController::open(FileStore::new(dir.path()), KEY);
    assert!(ctl.tasks().is_empty());

    // The corrupt file is left alone until the first change overwrites it.
    let raw = fs::read_to_string(dir.path().join("todos.json")).unwrap();
    assert_eq!(raw, "{not json");
    ctl.add("fresh");
    let raw = fs::read_to_string(dir.path().join("todos.json")).unwrap();
    assert!(raw.contains("fresh"));
}

#[test]
fn corrupt_slot_fails_when_strict() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("todos.json"), r#"[{"id":"x"}]"#).unwrap();

    let result = TaskListController::open_strict(FileStore::new(dir.path()), KEY);
    assert!(matches!(
        result,
        Err(LoadError::Decode(CodecError::Deserialization(_)))
    ));
}

#[test]
fn duplicate_ids_fail_when_strict() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("todos.json"),
        r#"[{"id":1,"text":"a","isComplete":false},{"id":1,"text":"b","isComplete":true}]"#,
    )
    .unwrap();

    let result = TaskListController::open_strict(FileStore::new(dir.path()), KEY);
    assert!(matches!(
        result,
        Err(LoadError::Decode(CodecError::DuplicateId(_)))
    ));
}

#[test]
fn invalid_key_fails_when_strict() {
    let dir = tempfile::tempdir().unwrap();
    let result = TaskListController::open_strict(FileStore::new(dir.path()), "../escape");
    assert!(matches!(result, Err(LoadError::Store(_))));
}

// ---------------------------------------------------------------------------
// Write failures
// ---------------------------------------------------------------------------

#[test]
fn failed_write_keeps_memory_state_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the data directory should be.
    let blocked = dir.path().join("blocked");
    fs::write(&blocked, "").unwrap();

    let (mut ctl, status) = TaskListController::open(FileStore::new(&blocked), KEY);
    let id = ctl.add("kept anyway").unwrap();

    assert!(ctl.tasks().contains(id));
    assert_eq!(status.failed_writes(), 1);
    assert!(status.last_error().is_some());
}
