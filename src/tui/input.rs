//! Input dispatch layer for Elm Architecture (TEA) pattern.
//!
//! Maps key events to messages based on current app mode.
//! Handles the gg chord with a non-blocking state machine.

use super::{App, Message};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// State machine for handling key chords.
///
/// Instead of blocking with `event::poll()` inline, we track pending keys
/// and check for timeout in the main event loop.
#[derive(Debug, Default)]
pub struct InputState {
    /// The first key of a potential chord sequence
    pub pending: Option<KeyCode>,
    /// When the pending key was pressed (for timeout detection)
    pub pending_since: Option<Instant>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there's a pending chord that has timed out (500ms).
    pub fn has_timed_out(&self) -> bool {
        if let Some(since) = self.pending_since {
            since.elapsed().as_millis() > 500
        } else {
            false
        }
    }

    /// Clear the pending chord state.
    pub fn clear(&mut self) {
        self.pending = None;
        self.pending_since = None;
    }

    /// Set a pending chord key.
    pub fn set_pending(&mut self, key: KeyCode) {
        self.pending = Some(key);
        self.pending_since = Some(Instant::now());
    }
}

/// Map key events to messages based on current app mode.
pub fn dispatch(app: &App, input: &mut InputState, key: KeyEvent) -> Message {
    // Ctrl-C quits from any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Message::Quit;
    }

    // Handle pending chords first
    if let Some(pending) = input.pending.take() {
        input.pending_since = None;
        return handle_chord(pending, key.code);
    }

    // Dispatch based on current mode
    if app.show_editor() {
        Message::EditorKey(key)
    } else if app.show_picker() {
        dispatch_picker(key)
    } else if app.show_help() {
        dispatch_help_modal(key)
    } else {
        dispatch_normal_mode(input, key)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mode-specific dispatch functions
// ─────────────────────────────────────────────────────────────────────────────

/// Handle keys in normal mode (group table).
fn dispatch_normal_mode(input: &mut InputState, key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Char('q') => Message::Quit,
        KeyCode::Char('j') | KeyCode::Down => Message::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Message::MoveUp,
        KeyCode::Char('G') => Message::GotoBottom,
        KeyCode::Char('g') => {
            input.set_pending(KeyCode::Char('g'));
            Message::None
        }
        KeyCode::Enter => Message::InvokeSelected,
        KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
            let digit = c.to_digit(10).unwrap_or(1) as usize;
            Message::InvokePosition(digit - 1)
        }
        KeyCode::Char('e') => Message::OpenEditor,
        KeyCode::Char('r') => Message::Refresh,
        KeyCode::Char('?') => Message::ToggleHelp,
        _ => Message::None,
    }
}

/// Handle keys while the selection prompt is open.
fn dispatch_picker(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Message::PickerCancel,
        KeyCode::Char('j') | KeyCode::Down => Message::PickerNext,
        KeyCode::Char('k') | KeyCode::Up => Message::PickerPrev,
        KeyCode::Enter => Message::PickerAccept,
        _ => Message::None,
    }
}

/// Handle keys in help modal.
fn dispatch_help_modal(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Message::CloseModal,
        _ => Message::None,
    }
}

/// Handle the second key of a chord sequence.
fn handle_chord(first: KeyCode, second: KeyCode) -> Message {
    match (first, second) {
        (KeyCode::Char('g'), KeyCode::Char('g')) => Message::GotoTop,
        _ => Message::None,
    }
}
