//! Tests for live binding reconciliation.
//!
//! A rebuild releases every existing binding and recreates the full set
//! from the snapshot, in order, showing indicators only after the whole
//! set is constructed.

mod test_utils;

use launchdeck::buttons::{Alignment, BindingRegistry, ButtonGroup};
use pretty_assertions::assert_eq;
use test_utils::{dispatcher, group, FakeHost, FakeTerminal, HostEvent};

fn registry_with(
    host: &mut FakeHost,
    groups: &[ButtonGroup],
) -> (BindingRegistry, FakeTerminal) {
    let terminal = FakeTerminal::new();
    let (dispatcher, _ui_rx) = dispatcher(terminal.clone(), None);
    let mut registry = BindingRegistry::new();
    registry.rebuild(host, groups, &dispatcher);
    (registry, terminal)
}

#[test]
fn test_rebuild_registers_one_binding_per_group() {
    let mut host = FakeHost::new();
    let groups = vec![
        group("build", &[("cargo build", "cargo build")]),
        group("test", &[("cargo test", "cargo test")]),
        group("deploy", &[]),
    ];

    let (registry, _) = registry_with(&mut host, &groups);

    assert_eq!(registry.len(), 3);
    assert_eq!(host.live_count(), 3);
    assert_eq!(host.handler_count(), 3);
    let texts: Vec<&str> = host
        .live_specs()
        .iter()
        .map(|spec| spec.text.as_str())
        .collect();
    assert_eq!(texts, vec!["build", "test", "deploy"]);
}

#[test]
fn test_rebuild_disposes_everything_before_recreating() {
    let mut host = FakeHost::new();
    let groups = vec![group("build", &[]), group("test", &[])];

    let terminal = FakeTerminal::new();
    let (dispatcher, _ui_rx) = dispatcher(terminal, None);
    let mut registry = BindingRegistry::new();
    registry.rebuild(&mut host, &groups, &dispatcher);

    host.events.clear();
    registry.rebuild(&mut host, &groups, &dispatcher);

    let first_register = host
        .events
        .iter()
        .position(|event| {
            matches!(
                event,
                HostEvent::RegisterHandler(_) | HostEvent::RegisterIndicator(_)
            )
        })
        .expect("rebuild registered nothing");
    let disposals = &host.events[..first_register];
    assert_eq!(
        disposals,
        &[
            HostEvent::DisposeIndicator(0),
            HostEvent::DisposeHandler(0),
            HostEvent::DisposeIndicator(1),
            HostEvent::DisposeHandler(1),
        ]
    );
}

#[test]
fn test_identical_snapshot_rebuild_is_idempotent() {
    let mut host = FakeHost::new();
    let groups = vec![
        group("build", &[("cargo build", "cargo build")]),
        group("lint", &[("clippy", "cargo clippy")]),
    ];

    let terminal = FakeTerminal::new();
    let (dispatcher, _ui_rx) = dispatcher(terminal, None);
    let mut registry = BindingRegistry::new();
    registry.rebuild(&mut host, &groups, &dispatcher);
    let before: Vec<String> = host
        .live_specs()
        .iter()
        .map(|spec| spec.text.clone())
        .collect();

    registry.rebuild(&mut host, &groups, &dispatcher);
    let after: Vec<String> = host
        .live_specs()
        .iter()
        .map(|spec| spec.text.clone())
        .collect();

    assert_eq!(before, after);
    assert_eq!(registry.len(), 2);
    assert_eq!(host.live_count(), 2);
    assert_eq!(host.handler_count(), 2);
    assert_eq!(host.visible_count(), 2);
}

#[test]
fn test_indicators_shown_only_after_all_are_constructed() {
    let mut host = FakeHost::new();
    let groups = vec![group("a", &[]), group("b", &[]), group("c", &[])];

    registry_with(&mut host, &groups);

    let last_register = host
        .events
        .iter()
        .rposition(|event| matches!(event, HostEvent::RegisterIndicator(_)))
        .unwrap();
    let first_show = host
        .events
        .iter()
        .position(|event| matches!(event, HostEvent::Show(_)))
        .unwrap();
    assert!(
        last_register < first_show,
        "a show happened before construction finished: {:?}",
        host.events
    );
    assert_eq!(host.visible_count(), 3);
}

#[test]
fn test_empty_snapshot_disposes_everything() {
    let mut host = FakeHost::new();
    let groups = vec![group("build", &[]), group("test", &[])];

    let terminal = FakeTerminal::new();
    let (dispatcher, _ui_rx) = dispatcher(terminal, None);
    let mut registry = BindingRegistry::new();
    registry.rebuild(&mut host, &groups, &dispatcher);

    registry.rebuild(&mut host, &[], &dispatcher);

    assert!(registry.is_empty());
    assert_eq!(host.live_count(), 0);
    assert_eq!(host.handler_count(), 0);
    assert_eq!(host.visible_count(), 0);
}

#[test]
fn test_no_stale_bindings_after_shrink() {
    let mut host = FakeHost::new();
    let three = vec![group("a", &[]), group("b", &[]), group("c", &[])];
    let one = vec![group("a", &[])];

    let terminal = FakeTerminal::new();
    let (dispatcher, _ui_rx) = dispatcher(terminal, None);
    let mut registry = BindingRegistry::new();
    registry.rebuild(&mut host, &three, &dispatcher);
    registry.rebuild(&mut host, &one, &dispatcher);

    assert_eq!(host.handler_count(), 1);
    assert_eq!(host.live_count(), 1);
    assert!(host.invoke(0).is_some());
    assert!(host.invoke(1).is_none());
    assert!(host.invoke(2).is_none());
}

#[test]
fn test_spec_carries_field_defaults() {
    let mut host = FakeHost::new();
    let groups = vec![ButtonGroup {
        text: "build".to_string(),
        ..Default::default()
    }];

    registry_with(&mut host, &groups);

    let specs = host.live_specs();
    let spec = specs[0];
    assert_eq!(spec.text, "build");
    assert_eq!(spec.tooltip, "build");
    assert_eq!(spec.alignment, Alignment::Left);
    assert_eq!(spec.priority, 0);
    assert_eq!(spec.color, None);
}

#[tokio::test]
async fn test_handler_closes_over_its_group() {
    let mut host = FakeHost::new();
    let groups = vec![
        group("build", &[("cargo build", "cargo build")]),
        group("test", &[("cargo test", "cargo test")]),
    ];

    let (_, terminal) = registry_with(&mut host, &groups);

    host.invoke(1).unwrap().await;

    let records = terminal.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Terminal 2");
    assert_eq!(records[0].submitted, vec!["cargo test".to_string()]);
}
