//! Local edit model for the button editor.
//!
//! The editor owns a private copy of the snapshot for the lifetime of one
//! session. Edits mutate only that buffer; nothing reaches the core until
//! the user commits, at which point the whole buffer crosses the surface
//! channel as one message. Closing without committing discards everything.
//!
//! Rows are addressed by position in the buffer, nothing else: deleting a
//! group renumbers everything after it, and the cursor is recomputed from
//! the new row list rather than chasing the old target.

use crate::buttons::group::{Alignment, ButtonGroup, CommandEntry};
use crate::surface::SurfaceEnd;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One selectable line in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorRow {
    /// Group header; group-level actions (delete, move) target this.
    Group(usize),
    /// One editable group field.
    Field(usize, GroupField),
    /// One editable field of one command entry.
    Entry(usize, usize, EntryField),
    /// Action row appending an entry to the group.
    AddEntry(usize),
    /// Trailing action row appending a new group.
    AddGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Text,
    Tooltip,
    Alignment,
    Priority,
    Color,
}

impl GroupField {
    pub fn label(&self) -> &'static str {
        match self {
            GroupField::Text => "Text",
            GroupField::Tooltip => "Tooltip",
            GroupField::Alignment => "Alignment",
            GroupField::Priority => "Priority",
            GroupField::Color => "Color",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Label,
    Command,
    TerminalName,
}

impl EntryField {
    pub fn label(&self) -> &'static str {
        match self {
            EntryField::Label => "Label",
            EntryField::Command => "Command",
            EntryField::TerminalName => "Terminal Name",
        }
    }
}

/// What the app should do after a key reached the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    /// Stay in the editor.
    Continue,
    /// Close without committing; the buffer is thrown away.
    Discard,
    /// The buffer was sent as a commit; close the editor.
    Committed,
}

/// Inline text input editing one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInput {
    pub target: EditorRow,
    pub value: String,
}

/// The editing surface: edit buffer, cursor, and inline input state.
pub struct EditorSurface {
    end: SurfaceEnd,
    buffer: Vec<ButtonGroup>,
    cursor: usize,
    input: Option<FieldInput>,
}

impl EditorSurface {
    /// Attach to a surface session, seeding the buffer from the core's
    /// `Init` message. A missing init (core gone) starts empty.
    pub fn attach(mut end: SurfaceEnd) -> Self {
        let buffer = end.recv_init().unwrap_or_default();
        Self {
            end,
            buffer,
            cursor: 0,
            input: None,
        }
    }

    pub fn buffer(&self) -> &[ButtonGroup] {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn input(&self) -> Option<&FieldInput> {
        self.input.as_ref()
    }

    /// Flat list of selectable rows derived from the buffer.
    pub fn rows(&self) -> Vec<EditorRow> {
        let mut rows = Vec::new();
        for (group_idx, group) in self.buffer.iter().enumerate() {
            rows.push(EditorRow::Group(group_idx));
            rows.push(EditorRow::Field(group_idx, GroupField::Text));
            rows.push(EditorRow::Field(group_idx, GroupField::Tooltip));
            rows.push(EditorRow::Field(group_idx, GroupField::Alignment));
            rows.push(EditorRow::Field(group_idx, GroupField::Priority));
            rows.push(EditorRow::Field(group_idx, GroupField::Color));
            for entry_idx in 0..group.commands.len() {
                rows.push(EditorRow::Entry(group_idx, entry_idx, EntryField::Label));
                rows.push(EditorRow::Entry(group_idx, entry_idx, EntryField::Command));
                rows.push(EditorRow::Entry(
                    group_idx,
                    entry_idx,
                    EntryField::TerminalName,
                ));
            }
            rows.push(EditorRow::AddEntry(group_idx));
        }
        rows.push(EditorRow::AddGroup);
        rows
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorOutcome {
        if self.input.is_some() {
            self.handle_input_key(key);
            return EditorOutcome::Continue;
        }

        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.end.send_commit(self.buffer.clone());
                return EditorOutcome::Committed;
            }
            KeyCode::Esc => return EditorOutcome::Discard,
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::Enter => self.activate_row(),
            KeyCode::Char('a') => {
                if let Some(group_idx) = self.group_at_cursor() {
                    self.add_entry(group_idx);
                }
            }
            KeyCode::Char('n') => self.add_group(),
            KeyCode::Char('d') => self.delete_at_cursor(),
            KeyCode::Char('J') => {
                if let Some(group_idx) = self.group_at_cursor() {
                    self.move_group(group_idx, 1);
                }
            }
            KeyCode::Char('K') => {
                if let Some(group_idx) = self.group_at_cursor() {
                    self.move_group(group_idx, -1);
                }
            }
            _ => {}
        }
        EditorOutcome::Continue
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.input = None,
            KeyCode::Enter => {
                if let Some(input) = self.input.take() {
                    self.apply_input(input.target, input.value);
                }
            }
            KeyCode::Backspace => {
                if let Some(input) = &mut self.input {
                    input.value.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(input) = &mut self.input {
                    input.value.push(c);
                }
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: i64) {
        let row_count = self.rows().len();
        if row_count == 0 {
            self.cursor = 0;
            return;
        }
        let current = self.cursor as i64;
        self.cursor = (current + delta).clamp(0, row_count as i64 - 1) as usize;
    }

    fn clamp_cursor(&mut self) {
        let row_count = self.rows().len();
        if self.cursor >= row_count {
            self.cursor = row_count.saturating_sub(1);
        }
    }

    fn group_at_cursor(&self) -> Option<usize> {
        match self.rows().get(self.cursor)? {
            EditorRow::Group(group_idx)
            | EditorRow::Field(group_idx, _)
            | EditorRow::Entry(group_idx, _, _)
            | EditorRow::AddEntry(group_idx) => Some(*group_idx),
            EditorRow::AddGroup => None,
        }
    }

    fn activate_row(&mut self) {
        let Some(row) = self.rows().get(self.cursor).copied() else {
            return;
        };
        match row {
            EditorRow::Field(group_idx, GroupField::Alignment) => {
                if let Some(group) = self.buffer.get_mut(group_idx) {
                    group.alignment = match group.alignment {
                        Alignment::Left => Alignment::Right,
                        Alignment::Right => Alignment::Left,
                    };
                }
            }
            EditorRow::Field(..) | EditorRow::Entry(..) => {
                self.input = Some(FieldInput {
                    target: row,
                    value: self.field_value(row),
                });
            }
            EditorRow::AddEntry(group_idx) => self.add_entry(group_idx),
            EditorRow::AddGroup => self.add_group(),
            EditorRow::Group(_) => {}
        }
    }

    pub fn field_value(&self, row: EditorRow) -> String {
        match row {
            EditorRow::Field(group_idx, field) => {
                let Some(group) = self.buffer.get(group_idx) else {
                    return String::new();
                };
                match field {
                    GroupField::Text => group.text.clone(),
                    GroupField::Tooltip => group.tooltip.clone().unwrap_or_default(),
                    GroupField::Alignment => String::new(),
                    GroupField::Priority => group.priority.to_string(),
                    GroupField::Color => group.color.clone().unwrap_or_default(),
                }
            }
            EditorRow::Entry(group_idx, entry_idx, field) => {
                let Some(entry) = self
                    .buffer
                    .get(group_idx)
                    .and_then(|group| group.commands.get(entry_idx))
                else {
                    return String::new();
                };
                match field {
                    EntryField::Label => entry.label.clone(),
                    EntryField::Command => entry.command.clone(),
                    EntryField::TerminalName => entry.terminal_name.clone().unwrap_or_default(),
                }
            }
            _ => String::new(),
        }
    }

    fn apply_input(&mut self, target: EditorRow, value: String) {
        match target {
            EditorRow::Field(group_idx, field) => {
                let Some(group) = self.buffer.get_mut(group_idx) else {
                    return;
                };
                match field {
                    GroupField::Text => group.text = value,
                    GroupField::Tooltip => group.tooltip = non_empty(value),
                    GroupField::Alignment => {}
                    GroupField::Priority => {
                        if let Ok(priority) = value.trim().parse() {
                            group.priority = priority;
                        }
                    }
                    GroupField::Color => group.color = non_empty(value),
                }
            }
            EditorRow::Entry(group_idx, entry_idx, field) => {
                let Some(entry) = self
                    .buffer
                    .get_mut(group_idx)
                    .and_then(|group| group.commands.get_mut(entry_idx))
                else {
                    return;
                };
                match field {
                    EntryField::Label => entry.label = value,
                    EntryField::Command => entry.command = value,
                    EntryField::TerminalName => entry.terminal_name = non_empty(value),
                }
            }
            _ => {}
        }
    }

    fn add_group(&mut self) {
        self.buffer.push(ButtonGroup {
            color: Some("#ffffff".to_string()),
            ..Default::default()
        });
        // Land on the new group's header
        let rows = self.rows();
        if let Some(position) = rows
            .iter()
            .position(|row| *row == EditorRow::Group(self.buffer.len() - 1))
        {
            self.cursor = position;
        }
    }

    fn add_entry(&mut self, group_idx: usize) {
        if let Some(group) = self.buffer.get_mut(group_idx) {
            group.commands.push(CommandEntry {
                label: String::new(),
                command: String::new(),
                terminal_name: None,
            });
        }
    }

    fn delete_at_cursor(&mut self) {
        let Some(row) = self.rows().get(self.cursor).copied() else {
            return;
        };
        match row {
            EditorRow::Group(group_idx) => {
                if group_idx < self.buffer.len() {
                    self.buffer.remove(group_idx);
                }
            }
            EditorRow::Entry(group_idx, entry_idx, _) => {
                if let Some(group) = self.buffer.get_mut(group_idx) {
                    if entry_idx < group.commands.len() {
                        group.commands.remove(entry_idx);
                    }
                }
            }
            _ => return,
        }
        self.clamp_cursor();
    }

    fn move_group(&mut self, group_idx: usize, delta: i64) {
        let target = group_idx as i64 + delta;
        if target < 0 || target >= self.buffer.len() as i64 {
            return;
        }
        let target = target as usize;
        self.buffer.swap(group_idx, target);
        // Follow the moved group
        let rows = self.rows();
        if let Some(position) = rows.iter().position(|row| *row == EditorRow::Group(target)) {
            self.cursor = position;
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
