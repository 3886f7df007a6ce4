//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; conversion into domain types happens at
//! the edges (`to_context`, `timeout`, ...).

mod context;
mod identity;
mod log;
mod output;
mod server;

pub use context::FileContextConfig;
pub use identity::FileIdentityConfig;
pub use log::FileLogConfig;
pub use output::FileOutputConfig;
pub use server::FileServerConfig;

use serde::{Deserialize, Serialize};
use yara_domain::ConfigIssue;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Reasoning service connection
    pub server: FileServerConfig,
    /// Default ambient context
    pub context: FileContextConfig,
    /// Client identity
    pub identity: FileIdentityConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Conversation trace
    pub log: FileLogConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.server.validate());
        issues.extend(self.context.validate());
        issues.extend(self.identity.validate());
        issues
    }
}
