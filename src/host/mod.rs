//! Host collaborator boundary.
//!
//! The binding engine never talks to concrete UI or terminal machinery;
//! it goes through these traits. The TUI status strip implements
//! [`IndicatorHost`], tmux implements [`TerminalHost`], and the test
//! suite swaps in recording fakes.

pub mod link;

use crate::buttons::group::Alignment;
use anyhow::Result;
use futures::future::BoxFuture;

pub use link::{Notice, NoticeLevel, UiLink, UiRequest};

/// Handle for one registered indicator widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndicatorId(pub u64);

/// Identifier an invocation handler is registered under.
///
/// Derived from the group's position in the current snapshot; stable only
/// until the next rebuild, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(usize);

impl HandlerId {
    pub fn for_position(position: usize) -> Self {
        Self(position)
    }

    pub fn position(&self) -> usize {
        self.0
    }
}

/// Everything the host needs to construct one indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSpec {
    pub text: String,
    pub tooltip: String,
    pub alignment: Alignment,
    pub priority: i64,
    pub color: Option<String>,
    pub handler: HandlerId,
}

/// Invocation handler: each call produces one independent dispatch future.
pub type HandlerFn = Box<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Host UI primitive boundary: indicator widgets plus handler registration.
///
/// Indicators are constructed hidden; [`IndicatorHost::show_indicator`]
/// makes them visible once construction is complete.
pub trait IndicatorHost {
    fn register_handler(&mut self, id: HandlerId, handler: HandlerFn);
    fn register_indicator(&mut self, spec: IndicatorSpec) -> IndicatorId;
    fn show_indicator(&mut self, id: IndicatorId);
    fn dispose_indicator(&mut self, id: IndicatorId);
    fn dispose_handler(&mut self, id: HandlerId);
}

/// Terminal-hosting capability: spawn a fresh named session.
pub trait TerminalHost: Send + Sync {
    fn create_session(&self, name: &str) -> Result<Box<dyn TerminalSession>>;
}

/// One spawned terminal session. Fire-and-forget: nothing tracks the
/// session after text is submitted.
pub trait TerminalSession: Send {
    fn show(&self) -> Result<()>;
    fn submit(&self, text: &str) -> Result<()>;
}
