//! Interactive chat module
//!
//! Provides a readline-based interactive chat with Buddy.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
