//! Button groups: data model, persistence, and the binding engine.

pub mod dispatch;
pub mod group;
pub mod registry;
pub mod resolve;
pub mod store;

pub use dispatch::Dispatcher;
pub use group::{Alignment, ButtonGroup, CommandEntry};
pub use registry::BindingRegistry;
pub use resolve::{resolve, ResolveContext};
pub use store::{ConfigStore, JsonStore, MemoryStore};

use crate::host::IndicatorHost;
use anyhow::Result;
use std::sync::Arc;

/// Ties the store, the registry, and the dispatcher together.
///
/// Holds the current in-memory snapshot; all changes to it arrive as full
/// replacements (a reload from the store or a committed edit buffer) and
/// are followed by a rebuild.
pub struct ButtonManager {
    store: Box<dyn ConfigStore>,
    registry: BindingRegistry,
    dispatcher: Arc<Dispatcher>,
    groups: Vec<ButtonGroup>,
}

impl ButtonManager {
    pub fn new(store: Box<dyn ConfigStore>, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            store,
            registry: BindingRegistry::new(),
            dispatcher,
            groups: Vec::new(),
        }
    }

    /// Current snapshot the live bindings were built from.
    pub fn groups(&self) -> &[ButtonGroup] {
        &self.groups
    }

    pub fn live_bindings(&self) -> usize {
        self.registry.len()
    }

    /// Read the stored snapshot (absent means empty) and rebuild from it.
    pub fn reload(&mut self, host: &mut dyn IndicatorHost) -> Result<()> {
        let groups = self.store.get()?.unwrap_or_default();
        self.groups = groups;
        self.registry.rebuild(host, &self.groups, &self.dispatcher);
        Ok(())
    }

    /// Persist a committed edit buffer as the new snapshot, replacing the
    /// stored value wholesale.
    ///
    /// The in-memory snapshot only advances when the write succeeds; on
    /// failure the previous groups (and their live bindings) stay in place.
    pub fn persist(&mut self, snapshot: Vec<ButtonGroup>) -> Result<()> {
        self.store.set(&snapshot)?;
        self.groups = snapshot;
        Ok(())
    }

    /// Rebuild live bindings from the current snapshot.
    pub fn rebuild(&mut self, host: &mut dyn IndicatorHost) {
        self.registry.rebuild(host, &self.groups, &self.dispatcher);
    }

    /// Release all live bindings; used on teardown.
    pub fn dispose_all(&mut self, host: &mut dyn IndicatorHost) {
        self.registry.dispose_all(host);
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }
}
