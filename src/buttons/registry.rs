//! Live binding lifecycle.
//!
//! The registry owns every indicator and handler currently registered with
//! the host. Reconciliation is clear-then-recreate: release everything,
//! then register one binding per group in snapshot order. There is no
//! diffing and no partial update; the snapshot is the whole truth.

use crate::buttons::dispatch::Dispatcher;
use crate::buttons::group::ButtonGroup;
use crate::host::{HandlerId, IndicatorHost, IndicatorId, IndicatorSpec};
use futures::FutureExt;
use std::sync::Arc;
use tracing::debug;

/// One live binding: the indicator handle plus its invocation handler.
struct LiveBinding {
    indicator: IndicatorId,
    handler: HandlerId,
}

/// Owner of the currently-active bindings.
#[derive(Default)]
pub struct BindingRegistry {
    live: Vec<LiveBinding>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Reconcile live bindings with `groups`.
    ///
    /// Total and idempotent: malformed groups were already defaulted at the
    /// store boundary, so nothing here can fail or reject. Indicators are
    /// registered hidden and shown together once the whole set exists.
    /// Must not interleave with itself; the event loop is the only caller.
    pub fn rebuild(
        &mut self,
        host: &mut dyn IndicatorHost,
        groups: &[ButtonGroup],
        dispatcher: &Arc<Dispatcher>,
    ) {
        self.dispose_all(host);

        let mut created = Vec::with_capacity(groups.len());
        for (position, group) in groups.iter().enumerate() {
            let handler = HandlerId::for_position(position);

            let dispatcher = Arc::clone(dispatcher);
            let group_data = group.clone();
            host.register_handler(
                handler,
                Box::new(move || {
                    let dispatcher = Arc::clone(&dispatcher);
                    let group = group_data.clone();
                    async move { dispatcher.invoke(position, group).await }.boxed()
                }),
            );

            let indicator = host.register_indicator(IndicatorSpec {
                text: group.text.clone(),
                tooltip: group.effective_tooltip().to_string(),
                alignment: group.alignment,
                priority: group.priority,
                color: group.color.clone(),
                handler,
            });

            created.push(LiveBinding { indicator, handler });
        }

        for binding in &created {
            host.show_indicator(binding.indicator);
        }
        self.live = created;

        debug!(bindings = self.live.len(), "rebuilt live bindings");
    }

    /// Release every live binding and handler, unconditionally.
    pub fn dispose_all(&mut self, host: &mut dyn IndicatorHost) {
        for binding in self.live.drain(..) {
            host.dispose_indicator(binding.indicator);
            host.dispose_handler(binding.handler);
        }
    }
}
