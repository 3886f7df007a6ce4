//! Domain layer for yara-client
//!
//! This crate contains the conversation entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A session is an append-only [`Timeline`] of [`Message`]s between the user
//! and the agent, plus the draft input and an "awaiting reply" flag
//! ([`SessionState`]). Nothing here is persisted.
//!
//! ## Side channels
//!
//! - [`Context`]: where and when the user is, attached to every message
//! - [`LearningInsights`]: what the service has learned about the user
//! - [`NotificationKind`]: transient success/error feedback

pub mod config;
pub mod context;
pub mod core;
pub mod identity;
pub mod insights;
pub mod notification;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use context::value_objects::{Context, ResolvedContext, TimeOfDay, UNKNOWN_PLACE};
pub use core::error::DomainError;
pub use identity::ClientId;
pub use insights::LearningInsights;
pub use notification::NotificationKind;
pub use session::{
    entities::{Message, MessageId, Reasoning, Sender, humanize_label},
    reply::ChatReply,
    state::SessionState,
    timeline::Timeline,
};
