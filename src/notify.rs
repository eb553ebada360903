//! Transient notifications shown over the reader.
//!
//! Each toast lives for a fixed time after it is shown and cannot be dismissed early.

use std::time::{Duration, Instant};

/// How long a toast stays up unless configured otherwise.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Tone of a toast.
pub enum NotificationKind {
    /// Something worked.
    Success,
    /// Something failed.
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A message shown until it expires.
pub struct Toast {
    /// Text shown to the user.
    pub message: String,
    /// Tone used for the toast colours.
    pub kind: NotificationKind,
    /// When the toast disappears.
    pub expires_at: Instant,
}

#[derive(Debug)]
/// Toasts currently on screen.
pub struct Notifier {
    ttl: Duration,
    toasts: Vec<Toast>,
}

impl Notifier {
    #[must_use]
    /// A notifier whose toasts last `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            toasts: Vec::new(),
        }
    }

    /// Shows `message` now.
    pub fn show_notification(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.show_at(message, kind, Instant::now());
    }

    /// Shows `message` as if raised at `now`.
    pub fn show_at(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        let message = message.into();
        match kind {
            NotificationKind::Success => tracing::info!(%message, "notification"),
            NotificationKind::Error => tracing::warn!(%message, "notification"),
        }
        self.toasts.push(Toast {
            message,
            kind,
            expires_at: now + self.ttl,
        });
    }

    /// Drops toasts whose time is up.
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    #[must_use]
    /// Toasts still on screen, oldest first.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    #[must_use]
    /// When the next toast expires.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.toasts.iter().map(|t| t.expires_at).min()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(NOTIFICATION_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires_after_ttl() {
        let mut notifier = Notifier::default();
        let t0 = Instant::now();
        notifier.show_at("Link copied", NotificationKind::Success, t0);

        notifier.prune(t0 + Duration::from_millis(2999));
        assert_eq!(notifier.toasts().len(), 1);
        assert_eq!(notifier.next_deadline(), Some(t0 + NOTIFICATION_TTL));

        notifier.prune(t0 + Duration::from_millis(3000));
        assert!(notifier.toasts().is_empty());
        assert!(notifier.next_deadline().is_none());
    }
}
