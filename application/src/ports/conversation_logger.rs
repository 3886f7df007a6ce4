//! Port for structured conversation logging.
//!
//! Records what happened in a session (messages sent, replies, failures,
//! imports) as machine-readable events. `tracing` covers diagnostics;
//! this is the transcript trace, written append-only and never read back.

use serde_json::Value;

/// Event type names emitted by the session core.
pub mod event_types {
    pub const MESSAGE_SENT: &str = "message_sent";
    pub const REPLY_RECEIVED: &str = "reply_received";
    pub const SUBMIT_FAILED: &str = "submit_failed";
    pub const TRANSCRIPT_IMPORTED: &str = "transcript_imported";
    pub const INSIGHTS_REFRESHED: &str = "insights_refreshed";
}

/// A structured conversation event.
///
/// The logger stamps each event with the time it is written.
pub struct ConversationEvent {
    /// Event type identifier (see [`event_types`]).
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// `log` is synchronous and non-fallible so it can never disturb the
/// send/receive cycle; write failures are dropped.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
