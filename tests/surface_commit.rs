//! Tests for the edit-commit path.
//!
//! An editing session seeds from an init snapshot, commits the complete
//! buffer back, and the committed snapshot replaces the stored one
//! wholesale. Persistence failures leave the previous snapshot live.

mod test_utils;

use crossterm::event::KeyCode;
use launchdeck::buttons::{ButtonManager, ConfigStore, JsonStore, MemoryStore};
use launchdeck::surface::{self, EditorOutcome, EditorSurface};
use pretty_assertions::assert_eq;
use test_utils::{dispatcher, group, key_event_ctrl, FailStore, FakeHost, FakeTerminal};

#[test]
fn test_init_seeds_editor_buffer() {
    let (core, surface_end) = surface::channel();
    let snapshot = vec![group("build", &[("make", "make")]), group("test", &[])];
    core.send_init(snapshot.clone());

    let editor = EditorSurface::attach(surface_end);

    assert_eq!(editor.buffer(), snapshot.as_slice());
}

#[test]
fn test_commit_carries_the_complete_buffer() {
    let (mut core, surface_end) = surface::channel();
    let snapshot = vec![group("build", &[("make", "make")])];
    core.send_init(snapshot.clone());

    let mut editor = EditorSurface::attach(surface_end);
    let outcome = editor.handle_key(key_event_ctrl(KeyCode::Char('s')));

    assert_eq!(outcome, EditorOutcome::Committed);
    assert_eq!(core.take_commit(), Some(snapshot));
}

#[test]
fn test_commit_replaces_snapshot_wholesale() {
    let store = MemoryStore::with_groups(vec![
        group("build", &[("make", "make")]),
        group("test", &[("check", "cargo test")]),
        group("deploy", &[]),
    ]);
    let (dispatcher, _ui_rx) = dispatcher(FakeTerminal::new(), None);
    let mut manager = ButtonManager::new(Box::new(store), dispatcher);

    let mut host = FakeHost::new();
    manager.reload(&mut host).unwrap();
    assert_eq!(manager.groups().len(), 3);

    let replacement = vec![group("release", &[("ship", "cargo publish")])];
    manager.persist(replacement.clone()).unwrap();

    // Nothing from the old snapshot survives, not even untouched groups
    assert_eq!(manager.groups(), replacement.as_slice());
}

#[test]
fn test_persisted_snapshot_round_trips_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("buttons.json");
    let (dispatcher, _ui_rx) = dispatcher(FakeTerminal::new(), None);

    let snapshot = vec![group("build", &[("make", "make")])];
    let mut manager = ButtonManager::new(Box::new(JsonStore::new(path.clone())), dispatcher);
    manager.persist(snapshot.clone()).unwrap();

    let reread = JsonStore::new(path).get().unwrap();
    assert_eq!(reread, Some(snapshot));
}

#[test]
fn test_rebuild_happens_after_persist_not_during() {
    let store = MemoryStore::with_groups(vec![group("build", &[]), group("test", &[])]);
    let (dispatcher, _ui_rx) = dispatcher(FakeTerminal::new(), None);
    let mut manager = ButtonManager::new(Box::new(store), dispatcher);

    let mut host = FakeHost::new();
    manager.reload(&mut host).unwrap();
    assert_eq!(manager.live_bindings(), 2);

    manager.persist(vec![group("release", &[])]).unwrap();

    // Persisting alone does not touch the host; the caller rebuilds next
    assert_eq!(manager.live_bindings(), 2);
    assert_eq!(host.live_count(), 2);

    manager.rebuild(&mut host);
    assert_eq!(manager.live_bindings(), 1);
    assert_eq!(host.live_specs()[0].text, "release");
}

#[test]
fn test_failed_persist_keeps_previous_snapshot() {
    let previous = vec![group("build", &[]), group("test", &[])];
    let store = FailStore::with_groups(previous.clone());
    let (dispatcher, _ui_rx) = dispatcher(FakeTerminal::new(), None);
    let mut manager = ButtonManager::new(Box::new(store), dispatcher);

    let mut host = FakeHost::new();
    manager.reload(&mut host).unwrap();
    assert_eq!(manager.live_bindings(), 2);

    let result = manager.persist(vec![group("release", &[])]);

    assert!(result.is_err());
    assert_eq!(manager.groups(), previous.as_slice());
    assert_eq!(manager.live_bindings(), 2);
}

#[test]
fn test_absent_store_reloads_as_empty() {
    let store = MemoryStore::new();
    let (dispatcher, _ui_rx) = dispatcher(FakeTerminal::new(), None);
    let mut manager = ButtonManager::new(Box::new(store), dispatcher);

    let mut host = FakeHost::new();
    manager.reload(&mut host).unwrap();

    assert!(manager.groups().is_empty());
    assert_eq!(manager.live_bindings(), 0);
}
