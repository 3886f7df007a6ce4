//! Transcript import use case.
//!
//! Feeds a pasted conversation to the service so it can learn from it.
//! This is a side channel: whatever the service answers, nothing is ever
//! appended to the session timeline. Errors stay inline on the import
//! surface instead of being raised as notifications.

use super::chat_session::ChatSession;
use crate::ports::conversation_logger::event_types;
use crate::ports::transport::TransportError;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use yara_domain::NotificationKind;
use yara_domain::notification::{IMPORT_RETRY, TRANSCRIPT_IMPORTED};

/// Inline message when the service answered with neither a reply nor an error.
pub const IMPORT_UNRECOGNIZED: &str = "Buddy couldn't make sense of that chat.";

/// State of the import surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportState {
    /// Text pasted so far
    pub input: String,
    pub is_open: bool,
    /// True while the service is analyzing
    pub is_analyzing: bool,
    /// Inline error shown on the surface
    pub error: Option<String>,
}

/// What a call to [`TranscriptImport::import`] did.
#[derive(Debug)]
pub enum ImportOutcome {
    /// Blank transcript; nothing happened.
    Ignored,
    /// Another import is still being analyzed; nothing happened.
    Busy,
    /// The service accepted the transcript.
    Imported,
    /// The service refused it; the reason is shown inline.
    Rejected(String),
    /// The service could not be reached.
    Failed(TransportError),
}

/// Clears the analyzing flag however the import finishes.
struct AnalyzingGuard<'a> {
    state: &'a watch::Sender<ImportState>,
}

impl Drop for AnalyzingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|state| state.is_analyzing = false);
    }
}

/// The import surface, bound to a [`ChatSession`].
#[derive(Clone)]
pub struct TranscriptImport {
    session: ChatSession,
    state: Arc<watch::Sender<ImportState>>,
}

impl TranscriptImport {
    pub fn new(session: ChatSession) -> Self {
        let (state, _) = watch::channel(ImportState::default());
        Self {
            session,
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> ImportState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ImportState> {
        self.state.subscribe()
    }

    pub fn open(&self) {
        self.state.send_modify(|state| state.is_open = true);
    }

    /// Close the surface. The pasted text is kept for next time.
    pub fn close(&self) {
        self.state.send_modify(|state| {
            state.is_open = false;
            state.error = None;
        });
    }

    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|state| state.input = text);
    }

    /// Send a transcript for analysis.
    pub async fn import(&self, raw_text: &str) -> ImportOutcome {
        if raw_text.trim().is_empty() {
            return ImportOutcome::Ignored;
        }

        let started = self.state.send_if_modified(|state| {
            if state.is_analyzing {
                return false;
            }
            state.is_analyzing = true;
            state.error = None;
            true
        });
        if !started {
            warn!("Import rejected: a transcript is still being analyzed");
            return ImportOutcome::Busy;
        }
        let _analyzing = AnalyzingGuard { state: &self.state };

        debug!("Importing transcript ({} bytes)", raw_text.len());
        let result = self
            .session
            .transport()
            .import_transcript(self.session.client_id(), raw_text)
            .await;

        match result {
            Ok(reply) if reply.usable_reply().is_some() => {
                info!("Transcript imported");
                self.session.log(
                    event_types::TRANSCRIPT_IMPORTED,
                    serde_json::json!({
                        "bytes": raw_text.len(),
                        "reply": reply.reply,
                    }),
                );
                self.session
                    .notifier()
                    .notify(NotificationKind::Success, TRANSCRIPT_IMPORTED);
                self.state.send_modify(|state| {
                    state.is_open = false;
                    state.input.clear();
                    state.error = None;
                });
                self.session.spawn_insight_refresh();
                ImportOutcome::Imported
            }
            Ok(reply) => {
                let reason = reply
                    .semantic_error()
                    .map(str::trim)
                    .filter(|e| !e.is_empty())
                    .unwrap_or(IMPORT_UNRECOGNIZED)
                    .to_string();
                warn!("Transcript rejected: {}", reason);
                self.show_error(&reason);
                ImportOutcome::Rejected(reason)
            }
            Err(e) => {
                warn!("Transcript import failed: {}", e);
                self.show_error(IMPORT_RETRY);
                ImportOutcome::Failed(e)
            }
        }
    }

    fn show_error(&self, message: &str) {
        let message = message.to_string();
        self.state.send_modify(|state| state.error = Some(message));
    }
}
