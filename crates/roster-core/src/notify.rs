use std::time::{Duration, Instant};

use tracing::debug;

/// How long a notice stays visible before auto-dismissal.
pub const DISMISS_AFTER: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    posted_at: Instant,
}

/// Single-slot notice holder: at most one notice is visible at a time and
/// a new one replaces the prior. Expiry is computed against a caller-supplied
/// clock so it can be tested without sleeping.
#[derive(Debug, Default)]
pub struct NotificationHub {
    current: Option<Notification>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push_at(message, Severity::Success, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push_at(message, Severity::Error, Instant::now());
    }

    pub fn push_at(&mut self, message: impl Into<String>, severity: Severity, at: Instant) {
        let message = message.into();
        debug!("[NotificationHub] Notice posted: severity={:?}", severity);
        self.current = Some(Notification {
            message,
            severity,
            posted_at: at,
        });
    }

    /// The notice visible at `now`, if any. Notices older than
    /// `DISMISS_AFTER` are no longer visible.
    pub fn current(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|n| now.duration_since(n.posted_at) < DISMISS_AFTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_visible_until_dismissal() {
        let mut hub = NotificationHub::new();
        let t0 = Instant::now();
        hub.push_at("Student added successfully!", Severity::Success, t0);

        let visible = hub.current(t0 + Duration::from_secs(1)).unwrap();
        assert_eq!(visible.message, "Student added successfully!");
        assert_eq!(visible.severity, Severity::Success);

        assert!(hub.current(t0 + Duration::from_secs(3)).is_none());
    }

    #[test]
    fn test_new_notice_replaces_prior() {
        let mut hub = NotificationHub::new();
        let t0 = Instant::now();
        hub.push_at("first", Severity::Success, t0);
        hub.push_at("second", Severity::Error, t0 + Duration::from_secs(1));

        let visible = hub.current(t0 + Duration::from_secs(2)).unwrap();
        assert_eq!(visible.message, "second");
        assert_eq!(visible.severity, Severity::Error);
    }

    #[test]
    fn test_empty_hub_has_no_notice() {
        let hub = NotificationHub::new();
        assert!(hub.current(Instant::now()).is_none());
    }
}
