//! Auto-dismissing notification banner.

use std::time::{Duration, Instant};

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    shown_at: Instant,
}

/// Holds at most one message; a new message replaces the old one.
#[derive(Debug, Clone, Default)]
pub struct NotificationBanner {
    current: Option<Notification>,
}

impl NotificationBanner {
    pub fn show(&mut self, message: impl Into<String>, level: NotificationLevel, now: Instant) {
        self.current = Some(Notification {
            message: message.into(),
            level,
            shown_at: now,
        });
    }

    /// The notification still visible at `now`, if any.
    pub fn visible(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|notification| now.duration_since(notification.shown_at) < NOTIFICATION_TTL)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{NotificationBanner, NotificationLevel, NOTIFICATION_TTL};
    use std::time::{Duration, Instant};

    #[test]
    fn notification_expires_after_ttl() {
        let mut banner = NotificationBanner::default();
        let shown_at = Instant::now();
        banner.show("Task deleted.", NotificationLevel::Info, shown_at);

        let visible = banner.visible(shown_at + Duration::from_secs(1)).unwrap();
        assert_eq!(visible.message, "Task deleted.");
        assert!(banner.visible(shown_at + NOTIFICATION_TTL).is_none());
    }

    #[test]
    fn newer_message_replaces_older_one() {
        let mut banner = NotificationBanner::default();
        let now = Instant::now();
        banner.show("first", NotificationLevel::Success, now);
        banner.show("second", NotificationLevel::Error, now);

        let visible = banner.visible(now).unwrap();
        assert_eq!(visible.message, "second");
        assert_eq!(visible.level, NotificationLevel::Error);
    }
}
