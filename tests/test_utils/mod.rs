//! Test utilities and fixtures for launchdeck tests

#![allow(dead_code)]

use anyhow::{bail, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use futures::future::BoxFuture;
use launchdeck::buttons::{ButtonGroup, CommandEntry, ConfigStore, Dispatcher, ResolveContext};
use launchdeck::host::{
    HandlerFn, HandlerId, IndicatorHost, IndicatorId, IndicatorSpec, TerminalHost, TerminalSession,
    UiLink, UiRequest,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedReceiver;

// ============================================================================
// Fixtures
// ============================================================================

pub fn entry(label: &str, command: &str) -> CommandEntry {
    CommandEntry {
        label: label.to_string(),
        command: command.to_string(),
        terminal_name: None,
    }
}

pub fn group(text: &str, commands: &[(&str, &str)]) -> ButtonGroup {
    ButtonGroup {
        text: text.to_string(),
        commands: commands
            .iter()
            .map(|(label, command)| entry(label, command))
            .collect(),
        ..Default::default()
    }
}

pub fn key_event(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

pub fn key_event_ctrl(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Type a string into a key-driven component, one char at a time.
pub fn type_chars(mut feed: impl FnMut(KeyEvent), text: &str) {
    for ch in text.chars() {
        feed(key_event(KeyCode::Char(ch)));
    }
}

// ============================================================================
// Recording indicator host
// ============================================================================

/// What the host was asked to do, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    RegisterHandler(usize),
    RegisterIndicator(u64),
    Show(u64),
    DisposeIndicator(u64),
    DisposeHandler(usize),
}

/// In-memory [`IndicatorHost`] that records every call.
#[derive(Default)]
pub struct FakeHost {
    next_id: u64,
    pub events: Vec<HostEvent>,
    live: Vec<(IndicatorId, IndicatorSpec)>,
    handlers: HashMap<HandlerId, HandlerFn>,
    visible: HashSet<IndicatorId>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently-live indicator specs in registration order.
    pub fn live_specs(&self) -> Vec<&IndicatorSpec> {
        self.live.iter().map(|(_, spec)| spec).collect()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Produce the dispatch future the handler at `position` would run.
    pub fn invoke(&self, position: usize) -> Option<BoxFuture<'static, ()>> {
        self.handlers
            .get(&HandlerId::for_position(position))
            .map(|handler| handler())
    }
}

impl IndicatorHost for FakeHost {
    fn register_handler(&mut self, id: HandlerId, handler: HandlerFn) {
        self.events.push(HostEvent::RegisterHandler(id.position()));
        self.handlers.insert(id, handler);
    }

    fn register_indicator(&mut self, spec: IndicatorSpec) -> IndicatorId {
        let id = IndicatorId(self.next_id);
        self.next_id += 1;
        self.events.push(HostEvent::RegisterIndicator(id.0));
        self.live.push((id, spec));
        id
    }

    fn show_indicator(&mut self, id: IndicatorId) {
        self.events.push(HostEvent::Show(id.0));
        self.visible.insert(id);
    }

    fn dispose_indicator(&mut self, id: IndicatorId) {
        self.events.push(HostEvent::DisposeIndicator(id.0));
        self.live.retain(|(live_id, _)| *live_id != id);
        self.visible.remove(&id);
    }

    fn dispose_handler(&mut self, id: HandlerId) {
        self.events.push(HostEvent::DisposeHandler(id.position()));
        self.handlers.remove(&id);
    }
}

// ============================================================================
// Recording terminal host
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct SessionRecord {
    pub name: String,
    pub shown: bool,
    pub submitted: Vec<String>,
}

/// [`TerminalHost`] that records sessions instead of spawning tmux.
#[derive(Clone, Default)]
pub struct FakeTerminal {
    pub sessions: Arc<Mutex<Vec<SessionRecord>>>,
    fail_create: Arc<AtomicBool>,
}

impl FakeTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_create(&self) {
        self.fail_create.store(true, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<SessionRecord> {
        self.sessions.lock().unwrap().clone()
    }
}

impl TerminalHost for FakeTerminal {
    fn create_session(&self, name: &str) -> Result<Box<dyn TerminalSession>> {
        if self.fail_create.swap(false, Ordering::SeqCst) {
            bail!("tmux is not running");
        }
        let mut sessions = self.sessions.lock().unwrap();
        sessions.push(SessionRecord {
            name: name.to_string(),
            ..Default::default()
        });
        let index = sessions.len() - 1;
        Ok(Box::new(FakeSession {
            index,
            sessions: Arc::clone(&self.sessions),
        }))
    }
}

struct FakeSession {
    index: usize,
    sessions: Arc<Mutex<Vec<SessionRecord>>>,
}

impl TerminalSession for FakeSession {
    fn show(&self) -> Result<()> {
        self.sessions.lock().unwrap()[self.index].shown = true;
        Ok(())
    }

    fn submit(&self, text: &str) -> Result<()> {
        self.sessions.lock().unwrap()[self.index]
            .submitted
            .push(text.to_string());
        Ok(())
    }
}

// ============================================================================
// Failing store
// ============================================================================

/// Store whose writes always fail.
#[derive(Default)]
pub struct FailStore {
    seed: Option<Vec<ButtonGroup>>,
}

impl FailStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_groups(groups: Vec<ButtonGroup>) -> Self {
        Self { seed: Some(groups) }
    }
}

impl ConfigStore for FailStore {
    fn get(&self) -> Result<Option<Vec<ButtonGroup>>> {
        Ok(self.seed.clone())
    }

    fn set(&self, _groups: &[ButtonGroup]) -> Result<()> {
        bail!("disk full")
    }
}

// ============================================================================
// Wiring helpers
// ============================================================================

/// Dispatcher over a fake terminal, plus the receiving end of its UI link.
pub fn dispatcher(
    terminal: FakeTerminal,
    workspace_root: Option<&str>,
) -> (Arc<Dispatcher>, UnboundedReceiver<UiRequest>) {
    let (ui, ui_rx) = UiLink::channel();
    let dispatcher = Dispatcher::new(
        Arc::new(terminal),
        ui,
        ResolveContext::new(workspace_root.map(|root| root.to_string())),
    );
    (Arc::new(dispatcher), ui_rx)
}
