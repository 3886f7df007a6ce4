//! Context store port

use yara_domain::Context;

/// Holder of the ambient context (city, place, time)
///
/// The session core only ever reads a snapshot at send time. Writers
/// (user commands, clock ticks) replace the whole value; last writer wins.
pub trait ContextStore: Send + Sync {
    /// Current context, cloned.
    fn snapshot(&self) -> Context;

    /// Replace the context wholesale.
    fn replace(&self, context: Context);

    /// Overlay the set fields of `patch` onto the current context.
    fn update(&self, patch: &Context) {
        let merged = self.snapshot().merged_with(patch);
        self.replace(merged);
    }
}
