//! Aggregate state of a conversation session

use super::timeline::Timeline;
use serde::Serialize;

/// Everything the session core owns (Aggregate)
///
/// Lives only in memory for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub timeline: Timeline,
    /// Draft text the user has typed but not sent
    pub pending_input: String,
    /// True while a submitted message is waiting for its reply
    pub is_awaiting_response: bool,
}

impl SessionState {
    /// Fresh state: the greeting, an empty draft, idle.
    pub fn new() -> Self {
        Self {
            timeline: Timeline::with_welcome(),
            pending_input: String::new(),
            is_awaiting_response: false,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
