use std::sync::RwLock;
use yara_application::ContextStore;
use yara_domain::Context;

/// Context held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryContextStore {
    context: RwLock<Context>,
}

impl InMemoryContextStore {
    pub fn new(initial: Context) -> Self {
        Self {
            context: RwLock::new(initial),
        }
    }
}

impl ContextStore for InMemoryContextStore {
    fn snapshot(&self) -> Context {
        match self.context.read() {
            Ok(context) => context.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn replace(&self, context: Context) {
        match self.context.write() {
            Ok(mut current) => *current = context,
            Err(poisoned) => *poisoned.into_inner() = context,
        }
    }
}
