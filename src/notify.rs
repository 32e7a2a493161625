use std::sync::Mutex;
use std::time::{Duration, Instant};

/// How long a success notification stays visible before it is dropped.
pub const SUCCESS_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    expires_at: Option<Instant>,
}

impl Notification {
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }
}

/// The notification region. Errors overwrite the whole region and persist;
/// successes are prepended and expire [`SUCCESS_TTL`] after display,
/// independent of any later generation cycle.
pub struct Notifier {
    entries: Mutex<Vec<Notification>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn show_error(&self, message: impl Into<String>) {
        let mut entries = self.entries.lock().unwrap();
        entries.clear();
        entries.push(Notification {
            kind: NotificationKind::Error,
            message: message.into(),
            expires_at: None,
        });
    }

    pub fn show_success(&self, message: impl Into<String>) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            0,
            Notification {
                kind: NotificationKind::Success,
                message: message.into(),
                expires_at: Some(Instant::now() + SUCCESS_TTL),
            },
        );
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// Notifications still visible at `now`. Expired successes are dropped
    /// from the region as a side effect.
    pub fn visible_at(&self, now: Instant) -> Vec<Notification> {
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|entry| !entry.is_expired_at(now));
        entries.clone()
    }

    pub fn visible(&self) -> Vec<Notification> {
        self.visible_at(Instant::now())
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_overwrites_region() {
        let notifier = Notifier::new();
        notifier.show_error("first");
        notifier.show_error("second");

        let visible = notifier.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].message, "second");
        assert_eq!(visible[0].kind, NotificationKind::Error);
    }

    #[test]
    fn test_success_prepends_above_existing() {
        let notifier = Notifier::new();
        notifier.show_error("boom");
        notifier.show_success("done");

        let visible = notifier.visible();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].kind, NotificationKind::Success);
        assert_eq!(visible[1].kind, NotificationKind::Error);
    }

    #[test]
    fn test_success_expires_error_persists() {
        let notifier = Notifier::new();
        notifier.show_error("boom");
        notifier.show_success("done");

        let later = Instant::now() + Duration::from_millis(5500);
        let visible = notifier.visible_at(later);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].kind, NotificationKind::Error);
        assert_eq!(visible[0].message, "boom");
    }

    #[test]
    fn test_success_visible_before_deadline() {
        let notifier = Notifier::new();
        notifier.show_success("done");

        let soon = Instant::now() + Duration::from_millis(4500);
        assert_eq!(notifier.visible_at(soon).len(), 1);
    }

    #[test]
    fn test_clear_empties_region() {
        let notifier = Notifier::new();
        notifier.show_error("boom");
        notifier.clear();
        assert!(notifier.visible().is_empty());
    }
}
