//! Toast notifications printed to the terminal

use crate::progress::indicator::ThinkingIndicator;
use colored::Colorize;
use std::io::Write;
use std::sync::Arc;
use yara_application::NotificationSink;
use yara_domain::NotificationKind;

/// Prints notifications to stderr with a colored marker.
#[derive(Default)]
pub struct ConsoleNotifier {
    indicator: Option<Arc<ThinkingIndicator>>,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide this spinner while a notification is printed.
    pub fn with_indicator(mut self, indicator: Arc<ThinkingIndicator>) -> Self {
        self.indicator = Some(indicator);
        self
    }

    pub fn format(kind: NotificationKind, message: &str) -> String {
        match kind {
            NotificationKind::Success => {
                format!("{} {}", "✓".green().bold(), message.green())
            }
            NotificationKind::Error => format!("{} {}", "✗".red().bold(), message.red()),
        }
    }
}

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        let line = Self::format(kind, message);
        let print = || {
            let _ = writeln!(std::io::stderr(), "{}", line);
        };
        match &self.indicator {
            Some(indicator) => indicator.suspend(print),
            None => print(),
        }
    }
}
