//! Editing surface sync protocol.
//!
//! The editor never reaches into core state and the core never observes
//! half-finished edits. All traffic between them is [`SyncMessage`]s over
//! one channel pair per surface session: an `Init` seeding the edit buffer
//! when the surface opens, and a `Commit` carrying the complete edited
//! snapshot back.

pub mod editor;

pub use editor::{EditorOutcome, EditorRow, EditorSurface, EntryField, GroupField};

use crate::buttons::group::ButtonGroup;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Messages crossing the surface channel.
///
/// Both kinds carry the full snapshot; there is no partial-field update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "groups", rename_all = "lowercase")]
pub enum SyncMessage {
    /// Core → surface: current snapshot, sent once when the surface opens.
    Init(Vec<ButtonGroup>),
    /// Surface → core: the complete edited snapshot to persist.
    Commit(Vec<ButtonGroup>),
}

/// Core-side endpoint of one surface session.
pub struct CoreEnd {
    tx: mpsc::UnboundedSender<SyncMessage>,
    rx: mpsc::UnboundedReceiver<SyncMessage>,
}

/// Surface-side endpoint of one surface session.
pub struct SurfaceEnd {
    tx: mpsc::UnboundedSender<SyncMessage>,
    rx: mpsc::UnboundedReceiver<SyncMessage>,
}

/// Create the duplex channel backing one surface session.
pub fn channel() -> (CoreEnd, SurfaceEnd) {
    let (core_tx, surface_rx) = mpsc::unbounded_channel();
    let (surface_tx, core_rx) = mpsc::unbounded_channel();
    (
        CoreEnd {
            tx: core_tx,
            rx: core_rx,
        },
        SurfaceEnd {
            tx: surface_tx,
            rx: surface_rx,
        },
    )
}

impl CoreEnd {
    /// Seed the surface with the current snapshot.
    pub fn send_init(&self, snapshot: Vec<ButtonGroup>) {
        let _ = self.tx.send(SyncMessage::Init(snapshot));
    }

    /// Drain pending surface messages, returning the last commit if any.
    pub fn take_commit(&mut self) -> Option<Vec<ButtonGroup>> {
        let mut committed = None;
        while let Ok(message) = self.rx.try_recv() {
            if let SyncMessage::Commit(snapshot) = message {
                committed = Some(snapshot);
            }
        }
        committed
    }
}

impl SurfaceEnd {
    /// Receive the initial snapshot, if the core has sent one.
    pub fn recv_init(&mut self) -> Option<Vec<ButtonGroup>> {
        while let Ok(message) = self.rx.try_recv() {
            if let SyncMessage::Init(snapshot) = message {
                return Some(snapshot);
            }
        }
        None
    }

    /// Send the complete edit buffer back as a commit.
    pub fn send_commit(&self, snapshot: Vec<ButtonGroup>) {
        let _ = self.tx.send(SyncMessage::Commit(snapshot));
    }
}
