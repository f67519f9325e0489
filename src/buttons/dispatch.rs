//! Command dispatch for invoked buttons.

use crate::buttons::group::{ButtonGroup, CommandEntry};
use crate::buttons::resolve::{resolve, ResolveContext};
use crate::host::{TerminalHost, UiLink};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

/// Runs one button invocation: selection, resolution, execution.
///
/// Shared by every registered handler; handlers close over their group and
/// call [`Dispatcher::invoke`] from a spawned task.
pub struct Dispatcher {
    terminal: Arc<dyn TerminalHost>,
    ui: UiLink,
    ctx: ResolveContext,
}

impl Dispatcher {
    pub fn new(terminal: Arc<dyn TerminalHost>, ui: UiLink, ctx: ResolveContext) -> Self {
        Self { terminal, ui, ctx }
    }

    /// Handle one invocation of the group at `position`.
    ///
    /// Zero entries and a cancelled prompt are silent no-ops. Execution
    /// failure surfaces as a notification and never propagates; one broken
    /// command must not take down other bindings.
    pub async fn invoke(&self, position: usize, group: ButtonGroup) {
        let entry = match group.commands.len() {
            0 => return,
            1 => &group.commands[0],
            _ => {
                let labels = group
                    .commands
                    .iter()
                    .map(|entry| entry.label.clone())
                    .collect();
                let choice = self.ui.pick("Select a command to execute", labels).await;
                match choice.and_then(|index| group.commands.get(index)) {
                    Some(entry) => entry,
                    None => return,
                }
            }
        };

        if let Err(err) = self.execute_entry(position, entry) {
            warn!(command = %entry.command, error = %err, "command execution failed");
            self.ui
                .notify_error(format!("Failed to execute command: {err:#}"));
        }
    }

    /// Resolve and run one entry in a fresh terminal session.
    pub fn execute_entry(&self, position: usize, entry: &CommandEntry) -> Result<()> {
        let command = resolve(&entry.command, &self.ctx);
        let name = entry.session_name(position);
        debug!(session = %name, command = %command, "spawning command");

        let session = self.terminal.create_session(&name)?;
        session.show()?;
        session.submit(&command)?;
        Ok(())
    }

    pub fn context(&self) -> &ResolveContext {
        &self.ctx
    }
}
