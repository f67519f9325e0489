//! Launchdeck - Status bar command launcher for the terminal
//!
//! This library crate exposes internal modules for integration testing.

pub mod buttons;
pub mod config;
pub mod host;
pub mod surface;
pub mod terminal;
pub mod tui;
pub mod watcher;
