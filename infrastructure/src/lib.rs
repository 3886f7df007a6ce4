//! Infrastructure layer for yara-client
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod context;
pub mod http;
pub mod identity;
pub mod insights;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileContextConfig, FileIdentityConfig, FileLogConfig,
    FileOutputConfig, FileServerConfig,
};
pub use context::InMemoryContextStore;
pub use http::{DEFAULT_BASE_URL, HttpChatTransport, HttpTransportError};
pub use identity::FileIdentityProvider;
pub use insights::InMemoryInsightCache;
pub use logging::JsonlConversationLogger;
