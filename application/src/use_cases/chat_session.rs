//! Chat session use case.
//!
//! [`ChatSession`] is the conversation session core: it owns the
//! [`SessionState`] (timeline, draft, awaiting flag) and runs the
//! send/receive cycle against a [`ChatTransport`].
//!
//! # Submit cycle
//!
//! ```text
//! Idle ──submit──▶ append user message (optimistic, never rolled back)
//!                  clear draft, awaiting = true
//!                  │
//!                  ▼ transport.send_message(client_id, text, context)
//!        ┌─────────┼──────────────────────┐
//!   reply ok   reply.error            transport error
//!   append agent   notify(error)          notify(error)
//!   learning? ─▶ notify(success) + refresh insights (fire-and-forget)
//!        └─────────┴──────────────────────┘
//!                  │ awaiting = false
//!                  ▼
//!                 Idle
//! ```
//!
//! A submit that arrives while another is still awaiting is rejected with
//! [`SubmitOutcome::Busy`] and leaves the state untouched.

use crate::ports::context_store::ContextStore;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, event_types,
};
use crate::ports::insight_cache::InsightCache;
use crate::ports::notification::{NoNotifications, NotificationSink};
use crate::ports::transport::{ChatTransport, TransportError};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};
use yara_domain::notification::SERVICE_UNREACHABLE;
use yara_domain::util::preview;
use yara_domain::{
    ChatReply, ClientId, LearningInsights, Message, NotificationKind, SessionState, TimeOfDay,
};

/// What a call to [`ChatSession::submit`] did.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blank input; nothing happened.
    Ignored,
    /// A previous submit is still awaiting its reply; nothing happened.
    Busy,
    /// The agent answered and its message was appended.
    Replied {
        /// Whether the reply carried a learning narration.
        learned: bool,
    },
    /// The service answered with an `error` field; no agent message.
    ServiceError(String),
    /// The service could not be reached; no agent message.
    TransportFailed(TransportError),
}

impl SubmitOutcome {
    /// True if the user message was appended (whatever happened next).
    pub fn was_sent(&self) -> bool {
        !matches!(self, SubmitOutcome::Ignored | SubmitOutcome::Busy)
    }

    pub fn is_replied(&self) -> bool {
        matches!(self, SubmitOutcome::Replied { .. })
    }
}

/// Resets the awaiting flag when the in-flight submit finishes, however
/// it finishes (including the future being dropped mid-request).
struct AwaitingGuard<'a> {
    state: &'a watch::Sender<SessionState>,
}

impl Drop for AwaitingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|state| state.is_awaiting_response = false);
    }
}

/// The conversation session core.
///
/// Cloning is cheap and every clone drives the same session.
#[derive(Clone)]
pub struct ChatSession {
    client_id: ClientId,
    transport: Arc<dyn ChatTransport>,
    context_store: Arc<dyn ContextStore>,
    insight_cache: Arc<dyn InsightCache>,
    notifier: Arc<dyn NotificationSink>,
    conversation_logger: Arc<dyn ConversationLogger>,
    state: Arc<watch::Sender<SessionState>>,
    background: TaskTracker,
}

impl ChatSession {
    pub fn new(
        client_id: ClientId,
        transport: Arc<dyn ChatTransport>,
        context_store: Arc<dyn ContextStore>,
        insight_cache: Arc<dyn InsightCache>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::new());
        Self {
            client_id,
            transport,
            context_store,
            insight_cache,
            notifier: Arc::new(NoNotifications),
            conversation_logger: Arc::new(NoConversationLogger),
            state: Arc::new(state),
            background: TaskTracker::new(),
        }
    }

    /// Create with a notification sink.
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Kick off the initial insight load. Returns immediately.
    pub fn start(&self) {
        info!("Starting chat session for {}", self.client_id);
        self.spawn_insight_refresh();
    }

    // ==================== Read side ====================

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.state.borrow().is_awaiting_response
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn context_store(&self) -> &Arc<dyn ContextStore> {
        &self.context_store
    }

    /// Last insights fetched, if any fetch has succeeded yet.
    pub fn insights(&self) -> Option<LearningInsights> {
        self.insight_cache.current()
    }

    pub(crate) fn transport(&self) -> &Arc<dyn ChatTransport> {
        &self.transport
    }

    pub(crate) fn notifier(&self) -> &Arc<dyn NotificationSink> {
        &self.notifier
    }

    pub(crate) fn log(&self, event_type: &'static str, payload: serde_json::Value) {
        self.conversation_logger
            .log(ConversationEvent::new(event_type, payload));
    }

    // ==================== Mutations ====================

    /// Update the draft buffer.
    pub fn set_pending_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_if_modified(|state| {
            if state.pending_input == text {
                return false;
            }
            state.pending_input = text;
            true
        });
    }

    /// Send a user message and wait for the agent's reply.
    ///
    /// Blank input is ignored. Failures are turned into notifications and
    /// reported through the returned [`SubmitOutcome`]; this never panics
    /// or returns an error.
    pub async fn submit(&self, raw_text: &str) -> SubmitOutcome {
        let message = match Message::user(raw_text) {
            Ok(message) => message,
            Err(_) => return SubmitOutcome::Ignored,
        };
        let text = message.text.clone();

        let accepted = self.state.send_if_modified(move |state| {
            if state.is_awaiting_response {
                return false;
            }
            state.timeline.push(message);
            state.pending_input.clear();
            state.is_awaiting_response = true;
            true
        });
        if !accepted {
            warn!("Submit rejected: a reply is still pending");
            return SubmitOutcome::Busy;
        }

        let _awaiting = AwaitingGuard { state: &self.state };

        let context = self.context_store.snapshot().resolve(TimeOfDay::now());
        debug!(
            "Sending message ({} bytes) with context city={:?} place={:?} time={:?}",
            text.len(),
            context.city,
            context.place,
            context.time
        );
        self.log(
            event_types::MESSAGE_SENT,
            serde_json::json!({
                "client_id": self.client_id.as_str(),
                "text": text,
                "context": context,
            }),
        );

        match self
            .transport
            .send_message(&self.client_id, &text, &context)
            .await
        {
            Ok(reply) => self.apply_reply(reply),
            Err(e) => {
                warn!("Failed to reach reasoning service: {}", e);
                self.notifier
                    .notify(NotificationKind::Error, SERVICE_UNREACHABLE);
                self.log(
                    event_types::SUBMIT_FAILED,
                    serde_json::json!({ "kind": "transport", "error": e.to_string() }),
                );
                SubmitOutcome::TransportFailed(e)
            }
        }
    }

    fn apply_reply(&self, reply: ChatReply) -> SubmitOutcome {
        if let Some(error) = reply.semantic_error() {
            warn!("Reasoning service reported an error: {}", error);
            self.notifier
                .notify(NotificationKind::Error, SERVICE_UNREACHABLE);
            self.log(
                event_types::SUBMIT_FAILED,
                serde_json::json!({ "kind": "service", "error": error }),
            );
            return SubmitOutcome::ServiceError(error.to_string());
        }

        let message = reply.to_agent_message();
        debug!(
            "Reply received: mode={:?} emotion={:?} \"{}\"",
            message.mode,
            message.emotion,
            preview(&message.text, 80)
        );
        self.log(
            event_types::REPLY_RECEIVED,
            serde_json::json!({
                "text": message.text,
                "mode": message.mode,
                "emotion": message.emotion,
                "intensity": message.intensity,
                "relationship": reply.relationship,
                "learning": reply.learning,
            }),
        );
        self.state
            .send_modify(move |state| state.timeline.push(message));

        let learned = match reply.learning_narration() {
            Some(narration) => {
                info!("Service learned something: {}", narration);
                self.notifier.notify(NotificationKind::Success, narration);
                self.spawn_insight_refresh();
                true
            }
            None => false,
        };

        SubmitOutcome::Replied { learned }
    }

    /// Whether the reasoning service answers at all.
    pub async fn check_health(&self) -> bool {
        let healthy = self.transport.health_check().await;
        debug!("Health check: {}", if healthy { "ok" } else { "unreachable" });
        healthy
    }

    // ==================== Insights ====================

    /// Fetch learning insights and replace the cache.
    ///
    /// Failures are logged and swallowed: a profile with nothing learned yet
    /// is a normal state, so this never reaches the user.
    pub async fn refresh_insights(&self) {
        match self.transport.fetch_insights(&self.client_id).await {
            Ok(insights) => {
                debug!(
                    "Insights refreshed: {} interactions, {} adaptations",
                    insights.total_interactions,
                    insights.adaptations_learned.len()
                );
                self.log(
                    event_types::INSIGHTS_REFRESHED,
                    serde_json::json!({
                        "total_interactions": insights.total_interactions,
                        "adaptations_learned": insights.adaptations_learned,
                    }),
                );
                self.insight_cache.replace(insights);
            }
            Err(e) => {
                debug!("Insight refresh failed (ignored): {}", e);
            }
        }
    }

    /// Run [`refresh_insights`](Self::refresh_insights) in the background.
    pub fn spawn_insight_refresh(&self) {
        let session = self.clone();
        self.background.spawn(async move {
            session.refresh_insights().await;
        });
    }

    /// Wait until every background side effect spawned so far has finished.
    pub async fn wait_for_background(&self) {
        self.background.close();
        self.background.wait().await;
        self.background.reopen();
    }
}
