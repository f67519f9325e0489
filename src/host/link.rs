//! Channel link between spawned invocation tasks and the UI event loop.
//!
//! Dispatch runs on spawned tasks and cannot touch UI state directly.
//! It sends requests through a [`UiLink`]; the event loop drains them on
//! its tick, shows the prompt or notification, and answers picks over a
//! oneshot reply.

use tokio::sync::{mpsc, oneshot};

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One user-facing notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Requests flowing from invocation tasks to the UI.
pub enum UiRequest {
    /// Ask the user to pick one label; reply with `None` on cancel.
    Pick {
        title: String,
        labels: Vec<String>,
        reply: oneshot::Sender<Option<usize>>,
    },
    /// Show a transient notification.
    Notify(Notice),
}

/// Clonable sender half handed to every dispatcher.
#[derive(Clone)]
pub struct UiLink {
    tx: mpsc::UnboundedSender<UiRequest>,
}

impl UiLink {
    /// Create a link plus the receiver the event loop drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UiRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Suspend until the user picks one of `labels` or cancels.
    ///
    /// A torn-down UI (closed channel, dropped reply) counts as cancel.
    pub async fn pick(&self, title: impl Into<String>, labels: Vec<String>) -> Option<usize> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = UiRequest::Pick {
            title: title.into(),
            labels,
            reply: reply_tx,
        };
        if self.tx.send(request).is_err() {
            return None;
        }
        reply_rx.await.unwrap_or(None)
    }

    pub fn notify_info(&self, text: impl Into<String>) {
        let _ = self.tx.send(UiRequest::Notify(Notice::info(text)));
    }

    pub fn notify_error(&self, text: impl Into<String>) {
        let _ = self.tx.send(UiRequest::Notify(Notice::error(text)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pick_resolves_with_reply() {
        let (link, mut rx) = UiLink::channel();

        let picker = tokio::spawn(async move {
            link.pick("Select", vec!["a".to_string(), "b".to_string()])
                .await
        });

        match rx.recv().await {
            Some(UiRequest::Pick { labels, reply, .. }) => {
                assert_eq!(labels, vec!["a".to_string(), "b".to_string()]);
                reply.send(Some(1)).unwrap();
            }
            _ => panic!("expected a pick request"),
        }

        assert_eq!(picker.await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn test_dropped_reply_is_cancel() {
        let (link, mut rx) = UiLink::channel();

        let picker = tokio::spawn(async move { link.pick("Select", vec!["a".to_string()]).await });

        match rx.recv().await {
            Some(UiRequest::Pick { reply, .. }) => drop(reply),
            _ => panic!("expected a pick request"),
        }

        assert_eq!(picker.await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_closed_channel_is_cancel() {
        let (link, rx) = UiLink::channel();
        drop(rx);
        assert_eq!(link.pick("Select", vec!["a".to_string()]).await, None);
    }
}
