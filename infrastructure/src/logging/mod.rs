//! Conversation trace logging.
//!
//! Provides [`JsonlConversationLogger`], an append-only JSONL file that
//! implements the [`ConversationLogger`](yara_application::ConversationLogger)
//! port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
