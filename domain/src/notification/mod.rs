//! Transient user feedback ("toasts").

use serde::{Deserialize, Serialize};

/// Kind of a transient notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

/// Shown whenever a message could not be answered, whatever the cause.
pub const SERVICE_UNREACHABLE: &str = "Couldn't reach Buddy's brain. Please try again.";

/// Shown after a transcript import went through.
pub const TRANSCRIPT_IMPORTED: &str = "Chat analyzed! Buddy now has more context.";

/// Shown inline when a transcript import could not reach the service.
pub const IMPORT_RETRY: &str = "Failed to analyze chat. Please try again.";
