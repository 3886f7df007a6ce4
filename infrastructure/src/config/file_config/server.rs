//! Service connection settings (`[server]` section)

use crate::http::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use yara_domain::{ConfigIssue, ConfigIssueCode};

/// Raw server configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Base URL of the reasoning service
    pub base_url: String,
    /// Per-request timeout in seconds (0 disables it)
    pub timeout_secs: u64,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl FileServerConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let base_url = self.base_url.trim();

        if base_url.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "server.base_url".to_string(),
                },
                "server.base_url is empty",
            ));
        } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::UnsupportedScheme {
                    field: "server.base_url".to_string(),
                    value: base_url.to_string(),
                },
                format!("server.base_url must start with http:// or https:// (got '{}')", base_url),
            ));
        }

        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroTimeout {
                    field: "server.timeout_secs".to_string(),
                },
                "server.timeout_secs is 0: requests will wait forever",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_zero_disables() {
        let config = FileServerConfig {
            timeout_secs: 0,
            ..FileServerConfig::default()
        };
        assert_eq!(config.timeout(), None);
        assert_eq!(FileServerConfig::default().timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_validate_scheme() {
        let config = FileServerConfig {
            base_url: "ftp://example.com".to_string(),
            ..FileServerConfig::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(matches!(
            issues[0].code,
            ConfigIssueCode::UnsupportedScheme { .. }
        ));
    }
}
