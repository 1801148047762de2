//! Transient notifications ("toasts").
//!
//! At most one notification is visible. Showing a new one replaces the old,
//! and each one disappears on its own after a fixed lifetime unless dismissed
//! first.

use log::debug;
use std::time::{Duration, Instant};

/// Default time a notification stays on screen.
pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub shown_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Info)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }
}

/// Holds the single visible notification.
#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Notification>,
    lifetime: Duration,
}

impl Notifier {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            current: None,
            lifetime,
        }
    }

    /// Show `notification`, replacing whatever is visible.
    pub fn show(&mut self, notification: Notification) {
        debug!("notification ({:?}): {}", notification.kind, notification.message);
        self.current = Some(notification);
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drop the notification if it has outlived its lifetime as of `now`.
    /// Returns `true` if one was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.shown_at) >= self.lifetime);
        if expired {
            self.current = None;
        }
        expired
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_LIFETIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_replaces_existing() {
        let mut notifier = Notifier::default();
        notifier.show(Notification::info("first"));
        notifier.show(Notification::success("second"));
        let current = notifier.current().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.kind, NotificationKind::Success);
    }

    #[test]
    fn test_dismiss() {
        let mut notifier = Notifier::default();
        notifier.show(Notification::error("oops"));
        notifier.dismiss();
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_expires_after_lifetime() {
        let mut notifier = Notifier::new(Duration::from_secs(5));
        let notification = Notification::success("saved");
        let shown_at = notification.shown_at;
        notifier.show(notification);

        assert!(!notifier.expire(shown_at + Duration::from_secs(4)));
        assert!(notifier.current().is_some());
        assert!(notifier.expire(shown_at + Duration::from_secs(5)));
        assert!(notifier.current().is_none());
        assert!(!notifier.expire(shown_at + Duration::from_secs(6)));
    }
}
