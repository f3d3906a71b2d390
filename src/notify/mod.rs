use tokio::sync::broadcast;
use tracing::{error, info, warn};

/// Notification severity, mirrored to the tracing level used when logging it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Human-readable status message surfaced to the presentation layer.
#[derive(Clone, Debug)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

/// Broadcast bus for status messages.
///
/// The presentation layer subscribes; a bus with no subscribers silently
/// drops messages. Every notification is also written to the log.
#[derive(Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(100);
        Self { tx }
    }

    pub fn notify(&self, severity: Severity, title: &str, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Info | Severity::Success => info!(title = %title, "{}", message),
            Severity::Warning => warn!(title = %title, "{}", message),
            Severity::Error => error!(title = %title, "{}", message),
        }
        let _ = self.tx.send(Notification {
            severity,
            title: title.to_string(),
            message,
        });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
