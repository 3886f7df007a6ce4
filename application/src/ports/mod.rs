//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters must implement.

pub mod context_store;
pub mod conversation_logger;
pub mod identity;
pub mod insight_cache;
pub mod notification;
pub mod transport;
