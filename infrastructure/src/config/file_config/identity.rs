//! Client identity settings (`[identity]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use yara_domain::{ClientId, ConfigIssue, ConfigIssueCode};

/// Raw identity configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileIdentityConfig {
    /// Use this id instead of the stored one
    pub client_id: Option<String>,
    /// Where the generated id is stored
    pub path: Option<PathBuf>,
}

impl FileIdentityConfig {
    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        match self.client_id.as_deref() {
            Some(raw) if ClientId::parse(raw).is_err() => vec![ConfigIssue::error(
                ConfigIssueCode::InvalidValue {
                    field: "identity.client_id".to_string(),
                    value: raw.to_string(),
                },
                format!(
                    "identity.client_id '{}' must be non-empty and contain no spaces, '/', '?' or '#'",
                    raw
                ),
            )],
            _ => Vec::new(),
        }
    }
}
