use crate::buttons::ButtonManager;
use crate::config::Config;
use crate::host::{HandlerId, Notice, UiRequest};
use crate::surface::{self, CoreEnd, EditorOutcome, EditorSurface};
use crate::tui::strip::StatusStrip;
use crate::watcher::StoreWatcher;
use anyhow::Result;
use crossterm::event::KeyEvent;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// Selection prompt for one pending pick request.
pub struct PickerState {
    pub title: String,
    pub labels: Vec<String>,
    pub selected: usize,
    reply: Option<oneshot::Sender<Option<usize>>>,
}

impl PickerState {
    fn answer(&mut self, choice: Option<usize>) {
        if let Some(reply) = self.reply.take() {
            let _ = reply.send(choice);
        }
    }
}

/// A notification currently on screen.
pub struct ActiveNotice {
    pub notice: Notice,
    pub shown_at: Instant,
}

/// Active modal state - only one modal can be active at a time
#[derive(Default)]
pub enum ModalState {
    #[default]
    None,
    Help,
    Picker(PickerState),
    Editor(EditorSurface),
}

impl ModalState {
    pub fn is_none(&self) -> bool {
        matches!(self, ModalState::None)
    }
}

pub struct App {
    pub config: Arc<Config>,
    pub manager: ButtonManager,
    pub strip: StatusStrip,
    pub modal: ModalState,
    /// Selected row in the group table.
    pub selected: usize,
    /// Terminal size, tracked for strip hit-testing.
    pub viewport: (u16, u16),
    pub notice: Option<ActiveNotice>,

    notice_ttl: Duration,
    /// Requests from spawned dispatch tasks, drained on tick.
    ui_rx: mpsc::UnboundedReceiver<UiRequest>,
    /// Prompts waiting for the modal slot, oldest first.
    pending_picks: VecDeque<PickerState>,
    /// Core endpoint of the open editor session, if any.
    surface_link: Option<CoreEnd>,
    watcher: Option<StoreWatcher>,
}

// Modal state accessors
impl App {
    pub fn show_help(&self) -> bool {
        matches!(self.modal, ModalState::Help)
    }

    pub fn show_picker(&self) -> bool {
        matches!(self.modal, ModalState::Picker(_))
    }

    pub fn show_editor(&self) -> bool {
        matches!(self.modal, ModalState::Editor(_))
    }

    pub fn picker(&self) -> Option<&PickerState> {
        match &self.modal {
            ModalState::Picker(picker) => Some(picker),
            _ => None,
        }
    }

    pub fn editor(&self) -> Option<&EditorSurface> {
        match &self.modal {
            ModalState::Editor(editor) => Some(editor),
            _ => None,
        }
    }
}

impl App {
    pub fn new(
        config: Config,
        manager: ButtonManager,
        ui_rx: mpsc::UnboundedReceiver<UiRequest>,
        watcher: Option<StoreWatcher>,
    ) -> Self {
        let notice_ttl = Duration::from_secs(config.notification_ttl_secs);
        Self {
            config: Arc::new(config),
            manager,
            strip: StatusStrip::new(),
            modal: ModalState::None,
            selected: 0,
            viewport: (0, 0),
            notice: None,
            notice_ttl,
            ui_rx,
            pending_picks: VecDeque::new(),
            surface_link: None,
            watcher,
        }
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    /// Process a message and update app state (Elm Architecture update function).
    ///
    /// Returns `Ok(true)` if the app should quit, `Ok(false)` to continue.
    pub async fn update(&mut self, msg: super::Message) -> Result<bool> {
        use super::Message;
        match msg {
            // ─────────────────────────────────────────────────────────────────
            // App lifecycle
            // ─────────────────────────────────────────────────────────────────
            Message::Quit => return Ok(true),
            Message::Refresh => self.reload_from_store(),

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Message::MoveUp => self.move_selection(-1),
            Message::MoveDown => self.move_selection(1),
            Message::GotoTop => self.selected = 0,
            Message::GotoBottom => {
                self.selected = self.manager.groups().len().saturating_sub(1);
            }

            // ─────────────────────────────────────────────────────────────────
            // Invocation
            // ─────────────────────────────────────────────────────────────────
            Message::InvokeSelected => self.invoke_position(self.selected),
            Message::InvokePosition(position) => self.invoke_position(position),
            Message::Click { column, row } => self.handle_click(column, row),

            // ─────────────────────────────────────────────────────────────────
            // Editor surface
            // ─────────────────────────────────────────────────────────────────
            Message::OpenEditor => self.open_editor(),
            Message::EditorKey(key) => self.handle_editor_key(key),

            // ─────────────────────────────────────────────────────────────────
            // Selection prompt
            // ─────────────────────────────────────────────────────────────────
            Message::PickerNext => {
                if let ModalState::Picker(picker) = &mut self.modal {
                    if picker.selected + 1 < picker.labels.len() {
                        picker.selected += 1;
                    }
                }
            }
            Message::PickerPrev => {
                if let ModalState::Picker(picker) = &mut self.modal {
                    picker.selected = picker.selected.saturating_sub(1);
                }
            }
            Message::PickerAccept => self.close_picker(true),
            Message::PickerCancel => self.close_picker(false),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Message::ToggleHelp => {
                self.modal = if self.show_help() {
                    ModalState::None
                } else {
                    ModalState::Help
                };
            }
            Message::CloseModal => match self.modal {
                ModalState::Picker(_) => self.close_picker(false),
                ModalState::Help => self.modal = ModalState::None,
                _ => {}
            },

            Message::None => {}
        }
        Ok(false)
    }

    /// Load the stored snapshot and rebuild the strip from it.
    pub fn reload_from_store(&mut self) {
        match self.manager.reload(&mut self.strip) {
            Ok(()) => self.clamp_selection(),
            Err(err) => {
                self.show_notice(Notice::error(format!("Failed to load buttons: {err:#}")));
            }
        }
    }

    /// Periodic update: drain dispatch requests, expire the notice, pick
    /// up external store edits.
    pub async fn on_tick(&mut self) {
        self.drain_ui_requests();
        self.expire_notice();
        self.poll_watcher();
    }

    pub fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(ActiveNotice {
            notice,
            shown_at: Instant::now(),
        });
    }

    /// Release all live bindings; called on teardown.
    pub fn dispose_bindings(&mut self) {
        self.manager.dispose_all(&mut self.strip);
    }

    fn invoke_position(&mut self, position: usize) {
        if let Some(task) = self.strip.invoke(HandlerId::for_position(position)) {
            tokio::spawn(task);
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        if !self.modal.is_none() {
            return;
        }
        let (width, height) = self.viewport;
        // The strip is the bottom line of the screen
        if height == 0 || row != height - 1 {
            return;
        }
        if let Some(handler) = self.strip.hit_test(column as usize, width as usize) {
            if let Some(task) = self.strip.invoke(handler) {
                tokio::spawn(task);
            }
        }
    }

    fn open_editor(&mut self) {
        if !self.modal.is_none() {
            return;
        }
        let (core, surface_end) = surface::channel();
        core.send_init(self.manager.groups().to_vec());
        self.surface_link = Some(core);
        self.modal = ModalState::Editor(EditorSurface::attach(surface_end));
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let outcome = match &mut self.modal {
            ModalState::Editor(editor) => editor.handle_key(key),
            _ => return,
        };
        match outcome {
            EditorOutcome::Continue => {}
            EditorOutcome::Discard => {
                self.modal = ModalState::None;
                self.surface_link = None;
                self.maybe_show_picker();
            }
            EditorOutcome::Committed => {
                self.modal = ModalState::None;
                self.apply_surface_commit();
                self.maybe_show_picker();
            }
        }
    }

    /// Apply a committed edit buffer: persist the snapshot, confirm to the
    /// user, then rebuild. A failed persist leaves the previous snapshot
    /// and its live bindings untouched.
    fn apply_surface_commit(&mut self) {
        let Some(mut link) = self.surface_link.take() else {
            return;
        };
        let Some(snapshot) = link.take_commit() else {
            return;
        };
        match self.manager.persist(snapshot) {
            Ok(()) => {
                self.show_notice(Notice::info("Custom buttons updated!"));
                self.manager.rebuild(&mut self.strip);
                self.clamp_selection();
            }
            Err(err) => {
                self.show_notice(Notice::error(format!("Failed to save buttons: {err:#}")));
            }
        }
    }

    fn close_picker(&mut self, accept: bool) {
        if !matches!(self.modal, ModalState::Picker(_)) {
            return;
        }
        if let ModalState::Picker(mut picker) = std::mem::take(&mut self.modal) {
            let choice = if accept && !picker.labels.is_empty() {
                Some(picker.selected)
            } else {
                None
            };
            picker.answer(choice);
        }
        self.maybe_show_picker();
    }

    fn drain_ui_requests(&mut self) {
        while let Ok(request) = self.ui_rx.try_recv() {
            match request {
                UiRequest::Pick {
                    title,
                    labels,
                    reply,
                } => {
                    self.pending_picks.push_back(PickerState {
                        title,
                        labels,
                        selected: 0,
                        reply: Some(reply),
                    });
                }
                UiRequest::Notify(notice) => self.show_notice(notice),
            }
        }
        self.maybe_show_picker();
    }

    fn maybe_show_picker(&mut self) {
        if self.modal.is_none() {
            if let Some(picker) = self.pending_picks.pop_front() {
                self.modal = ModalState::Picker(picker);
            }
        }
    }

    fn expire_notice(&mut self) {
        if let Some(active) = &self.notice {
            if active.shown_at.elapsed() >= self.notice_ttl {
                self.notice = None;
            }
        }
    }

    fn poll_watcher(&mut self) {
        let changed = self.watcher.as_ref().is_some_and(|watcher| watcher.poll());
        if changed {
            debug!("button store changed on disk, reloading");
            self.reload_from_store();
        }
    }

    fn move_selection(&mut self, delta: i64) {
        let len = self.manager.groups().len();
        if len == 0 {
            return;
        }
        let target = self.selected as i64 + delta;
        self.selected = target.clamp(0, len as i64 - 1) as usize;
    }

    fn clamp_selection(&mut self) {
        let len = self.manager.groups().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}
