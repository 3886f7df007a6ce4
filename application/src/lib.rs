//! Application layer for yara-client
//!
//! This crate contains the conversation session core and the ports it
//! talks through. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    context_store::ContextStore,
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    identity::{FixedIdentity, IdentityError, IdentityProvider},
    insight_cache::InsightCache,
    notification::{NoNotifications, NotificationSink},
    transport::{ChatTransport, TransportError},
};
pub use use_cases::chat_session::{ChatSession, SubmitOutcome};
pub use use_cases::import_transcript::{ImportOutcome, ImportState, TranscriptImport};
