//! Chat transport port
//!
//! Defines the interface for talking to the remote reasoning service.

use async_trait::async_trait;
use thiserror::Error;
use yara_domain::{ChatReply, ClientId, LearningInsights, ResolvedContext};

/// Errors that can occur while reaching the reasoning service
///
/// These are transport-level failures. A reply that arrives but carries an
/// `error` field is *not* a `TransportError`; see
/// [`ChatReply::semantic_error`](yara_domain::ChatReply::semantic_error).
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout")]
    Timeout,

    #[error("Unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl TransportError {
    /// True for failures that never reached the service.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, TransportError::Connection(_) | TransportError::Timeout)
    }
}

/// Stateless request/response access to the reasoning service
///
/// Implementations (adapters) live in the infrastructure layer. Timeouts
/// and retries, if any, are their concern.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one user message together with the ambient context.
    async fn send_message(
        &self,
        client_id: &ClientId,
        text: &str,
        context: &ResolvedContext,
    ) -> Result<ChatReply, TransportError>;

    /// Hand a pasted conversation to the service for analysis.
    async fn import_transcript(
        &self,
        client_id: &ClientId,
        chat_text: &str,
    ) -> Result<ChatReply, TransportError>;

    /// Fetch what the service has learned about this client so far.
    async fn fetch_insights(&self, client_id: &ClientId)
    -> Result<LearningInsights, TransportError>;

    /// Whether the service answers at all. Never fails.
    async fn health_check(&self) -> bool;
}
