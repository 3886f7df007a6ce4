//! Ambient context storage
//!
//! Provides [`InMemoryContextStore`], the process-local implementation of
//! the [`ContextStore`](yara_application::ContextStore) port.

mod store;

pub use store::InMemoryContextStore;
