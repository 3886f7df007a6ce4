//! Presentation layer for yara-client
//!
//! This crate contains CLI definitions, console formatting, toast
//! notifications, the thinking spinner, and the interactive chat.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::Cli;
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use output::notifier::ConsoleNotifier;
pub use progress::indicator::ThinkingIndicator;
