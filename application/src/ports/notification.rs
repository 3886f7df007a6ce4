//! Notification sink port
//!
//! Transient, non-blocking feedback ("toasts"). The session core fires
//! these and moves on; it never waits for or inspects the outcome.

use yara_domain::NotificationKind;

/// Surface for transient user feedback
///
/// `notify` is synchronous and infallible: an implementation that cannot
/// display something must drop it silently rather than panic.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);
}

/// No-op sink for tests and headless use.
pub struct NoNotifications;

impl NotificationSink for NoNotifications {
    fn notify(&self, _kind: NotificationKind, _message: &str) {}
}
