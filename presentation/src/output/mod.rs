//! Console output: message formatting and toast notifications

pub mod console;
pub mod notifier;
