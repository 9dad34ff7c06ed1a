//! Notification sink for reporting operation outcomes.
//!
//! The cache reports success or failure of every mutating operation through
//! a write-only, fire-and-forget `Notifier`. Nothing is awaited and no
//! acknowledgment is expected; a UI layer typically renders these as toasts,
//! while headless callers can use `TracingNotifier`.

use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotifyKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: &str, message: &str) -> Self {
        Self {
            kind: NotifyKind::Success,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(title: &str, message: &str) -> Self {
        Self {
            kind: NotifyKind::Error,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

/// Write-only channel for user-facing operation outcomes.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that forwards notifications to the log.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotifyKind::Success => {
                info!(title = %notification.title, "{}", notification.message);
            }
            NotifyKind::Error => {
                warn!(title = %notification.title, "{}", notification.message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_constructors() {
        let ok = Notification::success("Success", "Neologism created successfully");
        assert_eq!(ok.kind, NotifyKind::Success);
        assert_eq!(ok.title, "Success");

        let err = Notification::error("Error", "Failed to create neologism");
        assert_eq!(err.kind, NotifyKind::Error);
        assert_eq!(err.message, "Failed to create neologism");
    }
}
