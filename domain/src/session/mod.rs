//! Conversation session domain.
//!
//! - [`entities::Message`]: a single entry in the conversation
//! - [`timeline::Timeline`]: the append-only message sequence
//! - [`state::SessionState`]: the aggregate the session core manages
//! - [`reply::ChatReply`]: what the reasoning service answers with

pub mod entities;
pub mod reply;
pub mod state;
pub mod timeline;
