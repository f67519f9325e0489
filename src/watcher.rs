//! File watcher for external edits to the button store.
//!
//! Watches the store file's parent directory and flags changes so the TUI
//! can reload and rebuild. Rebuild is idempotent, so events caused by our
//! own writes are harmless.

use anyhow::{Context, Result};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::time::Duration;

/// Watcher over the button store file.
pub struct StoreWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
    path: PathBuf,
}

impl StoreWatcher {
    pub fn new(store_path: &Path) -> Result<Self> {
        let parent = store_path
            .parent()
            .context("Button store path has no parent directory")?;
        // The directory must exist before it can be watched
        std::fs::create_dir_all(parent)?;

        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default().with_poll_interval(Duration::from_secs(1)),
        )?;

        // Watch the parent directory: the file itself may not exist yet
        watcher.watch(parent, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            path: store_path.to_path_buf(),
        })
    }

    /// Poll for changes to the store file.
    ///
    /// Drains every pending event and reports a single change, so a burst
    /// of writes triggers one reload.
    pub fn poll(&self) -> bool {
        let mut changed = false;

        loop {
            match self.receiver.try_recv() {
                Ok(Ok(event)) => {
                    if self.touches_store(&event) {
                        changed = true;
                    }
                }
                Ok(Err(_)) => {
                    // Watcher error, ignore
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }

        changed
    }

    fn touches_store(&self, event: &Event) -> bool {
        let store_name = self.path.file_name();
        event
            .paths
            .iter()
            .any(|path| path.file_name() == store_name)
    }
}
