//! tmux-backed terminal sessions.
//!
//! Each executed command gets a fresh detached tmux session. Inside tmux
//! the client switches to it; outside, the session is left detached under
//! its name for a later `tmux attach`.

use crate::host::{TerminalHost, TerminalSession};
use anyhow::{bail, Context, Result};
use std::process::Command;
use tracing::debug;

/// Check if tmux is available on the system.
pub fn tmux_available() -> bool {
    Command::new("tmux")
        .arg("-V")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Check if a tmux session with the given name exists.
pub fn session_exists(name: &str) -> bool {
    Command::new("tmux")
        .args(["has-session", "-t", name])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Session names feed tmux target syntax, where `.` and `:` split panes
/// and windows.
fn sanitize_name(name: &str) -> String {
    name.replace(['.', ':'], "-")
}

/// First free variant of `base`, suffixing a counter on collision.
fn free_session_name(base: &str) -> String {
    if !session_exists(base) {
        return base.to_string();
    }
    let mut counter = 2;
    loop {
        let candidate = format!("{base}-{counter}");
        if !session_exists(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// [`TerminalHost`] spawning detached tmux sessions.
pub struct TmuxHost {
    start_dir: Option<String>,
}

impl TmuxHost {
    /// `start_dir` becomes the working directory of every spawned session.
    pub fn new(start_dir: Option<String>) -> Self {
        Self { start_dir }
    }
}

impl TerminalHost for TmuxHost {
    fn create_session(&self, name: &str) -> Result<Box<dyn TerminalSession>> {
        let name = free_session_name(&sanitize_name(name));

        let mut command = Command::new("tmux");
        command.args(["new-session", "-d", "-s", &name]);
        if let Some(dir) = &self.start_dir {
            command.args(["-c", dir]);
        }

        let output = command
            .output()
            .context("Failed to run tmux (is tmux installed?)")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("Failed to create tmux session: {}", stderr.trim());
        }

        debug!(session = %name, "created tmux session");
        Ok(Box::new(TmuxSession { name }))
    }
}

/// One detached tmux session created for a single command.
pub struct TmuxSession {
    name: String,
}

impl TmuxSession {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TerminalSession for TmuxSession {
    fn show(&self) -> Result<()> {
        let inside_tmux = std::env::var("TMUX").is_ok();
        if !inside_tmux {
            // Nothing to focus from here; the session stays detached.
            debug!(session = %self.name, "not inside tmux, session left detached");
            return Ok(());
        }

        let output = Command::new("tmux")
            .args(["switch-client", "-t", &self.name])
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("Failed to switch to tmux session: {}", stderr.trim());
        }
        Ok(())
    }

    fn submit(&self, text: &str) -> Result<()> {
        let output = Command::new("tmux")
            .args(["send-keys", "-t", &self.name, text, "Enter"])
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("Failed to send command to tmux session: {}", stderr.trim());
        }
        Ok(())
    }
}
