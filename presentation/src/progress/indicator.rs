//! Spinner shown while a reply is pending

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use yara_domain::SessionState;

/// Default spinner text
pub const THINKING_MESSAGE: &str = "Buddy is thinking...";

/// A single spinner line that can be started and stopped repeatedly
pub struct ThinkingIndicator {
    bar: Mutex<Option<ProgressBar>>,
    message: String,
}

impl ThinkingIndicator {
    pub fn new() -> Self {
        Self::with_message(THINKING_MESSAGE)
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            bar: Mutex::new(None),
            message: message.into(),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.magenta} {msg:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.bar.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Show the spinner; no-op if it is already spinning.
    pub fn start(&self) {
        let mut bar = self.bar();
        if bar.is_some() {
            return;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::style());
        pb.set_message(self.message.clone());
        pb.enable_steady_tick(Duration::from_millis(100));
        *bar = Some(pb);
    }

    /// Remove the spinner line; no-op if it is not spinning.
    pub fn stop(&self) {
        if let Some(pb) = self.bar().take() {
            pb.finish_and_clear();
        }
    }

    pub fn is_running(&self) -> bool {
        self.bar().is_some()
    }

    /// Run `f` with the spinner hidden so its output is not garbled.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        match self.bar().as_ref() {
            Some(pb) => pb.suspend(f),
            None => f(),
        }
    }

    /// Spin whenever the session is awaiting a reply.
    ///
    /// The task ends when the session is dropped.
    pub fn follow(self: &Arc<Self>, mut state: watch::Receiver<SessionState>) -> JoinHandle<()> {
        let indicator = Arc::clone(self);
        tokio::spawn(async move {
            while state.changed().await.is_ok() {
                let awaiting = state.borrow_and_update().is_awaiting_response;
                if awaiting {
                    indicator.start();
                } else {
                    indicator.stop();
                }
            }
            indicator.stop();
        })
    }
}

impl Default for ThinkingIndicator {
    fn default() -> Self {
        Self::new()
    }
}
