//! Message enum for Elm Architecture (TEA) pattern.
//!
//! All possible user actions in the application are represented as
//! messages, dispatched from input events and processed by `App::update()`.

use crossterm::event::KeyEvent;

/// All possible user actions in the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ─────────────────────────────────────────────────────────────────────────
    // App lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Quit the application
    Quit,
    /// Reload the snapshot from the store and rebuild
    Refresh,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move selection up by one
    MoveUp,
    /// Move selection down by one
    MoveDown,
    /// Go to the first group
    GotoTop,
    /// Go to the last group
    GotoBottom,

    // ─────────────────────────────────────────────────────────────────────────
    // Invocation
    // ─────────────────────────────────────────────────────────────────────────
    /// Invoke the selected group
    InvokeSelected,
    /// Invoke the group at a position (number keys)
    InvokePosition(usize),
    /// Mouse click at screen coordinates
    Click { column: u16, row: u16 },

    // ─────────────────────────────────────────────────────────────────────────
    // Editor surface
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the button editor
    OpenEditor,
    /// Key for the editor surface to consume
    EditorKey(KeyEvent),

    // ─────────────────────────────────────────────────────────────────────────
    // Selection prompt
    // ─────────────────────────────────────────────────────────────────────────
    /// Move the prompt selection down
    PickerNext,
    /// Move the prompt selection up
    PickerPrev,
    /// Accept the highlighted prompt entry
    PickerAccept,
    /// Dismiss the prompt without selecting
    PickerCancel,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Toggle help modal
    ToggleHelp,
    /// Close current modal
    CloseModal,

    /// No-op (unhandled key)
    None,
}
