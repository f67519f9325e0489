//! Button snapshot persistence.
//!
//! Handles atomic read/write of the stored button groups to:
//! ~/.local/share/launchdeck/buttons.json
//!
//! The file always holds one complete snapshot (a JSON array of groups);
//! writes are full replacements, never merges.

use crate::buttons::group::{groups_from_values, ButtonGroup};
use anyhow::{Context, Result};
use fs2::FileExt;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable store for the button group snapshot.
///
/// `get` returning `None` means nothing has been stored yet; callers treat
/// that as an empty sequence.
pub trait ConfigStore: Send + Sync {
    fn get(&self) -> Result<Option<Vec<ButtonGroup>>>;
    fn set(&self, groups: &[ButtonGroup]) -> Result<()>;
}

/// File-backed store holding the snapshot as pretty-printed JSON.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default store location under the platform data directory.
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = crate::config::data_dir()?;
        Ok(data_dir.join("buttons.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonStore {
    fn get(&self) -> Result<Option<Vec<ButtonGroup>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open button store at {}", self.path.display()))?;
        file.lock_shared()?; // Shared lock for reading

        let mut content = String::new();
        let mut reader = std::io::BufReader::new(&file);
        reader.read_to_string(&mut content)?;

        file.unlock()?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let doc: Value = serde_json::from_str(&content)
            .with_context(|| format!("Button store at {} is not valid JSON", self.path.display()))?;
        let items = doc.as_array().with_context(|| {
            format!(
                "Button store at {} is not a JSON array",
                self.path.display()
            )
        })?;

        Ok(Some(groups_from_values(items)))
    }

    fn set(&self, groups: &[ButtonGroup]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&self.path)
            .with_context(|| format!("Failed to write button store at {}", self.path.display()))?;
        file.lock_exclusive()?; // Exclusive lock for writing

        let content = serde_json::to_string_pretty(groups)?;
        let mut writer = std::io::BufWriter::new(&file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;

        file.unlock()?;

        Ok(())
    }
}

/// In-memory store for tests and headless tooling.
#[derive(Default)]
pub struct MemoryStore {
    groups: Mutex<Option<Vec<ButtonGroup>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_groups(groups: Vec<ButtonGroup>) -> Self {
        Self {
            groups: Mutex::new(Some(groups)),
        }
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self) -> Result<Option<Vec<ButtonGroup>>> {
        let guard = self
            .groups
            .lock()
            .map_err(|_| anyhow::anyhow!("Button store lock poisoned"))?;
        Ok(guard.clone())
    }

    fn set(&self, groups: &[ButtonGroup]) -> Result<()> {
        let mut guard = self
            .groups
            .lock()
            .map_err(|_| anyhow::anyhow!("Button store lock poisoned"))?;
        *guard = Some(groups.to_vec());
        Ok(())
    }
}
