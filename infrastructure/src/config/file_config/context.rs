//! Default ambient context (`[context]` section)

use serde::{Deserialize, Serialize};
use yara_domain::{ConfigIssue, ConfigIssueCode, Context, TimeOfDay};

/// Raw context configuration from TOML
///
/// Every field is optional; unset fields fall back to the wire defaults at
/// send time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileContextConfig {
    pub city: Option<String>,
    pub place: Option<String>,
    /// Fixed time label; derived from the clock when unset
    pub time: Option<String>,
}

impl FileContextConfig {
    pub fn to_context(&self) -> Context {
        Context {
            city: self.city.clone(),
            place: self.place.clone(),
            time: self.time.clone(),
        }
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let Some(time) = self.time.as_deref() else {
            return Vec::new();
        };
        if time.parse::<TimeOfDay>().is_ok() {
            return Vec::new();
        }
        vec![ConfigIssue::warning(
            ConfigIssueCode::InvalidValue {
                field: "context.time".to_string(),
                value: time.to_string(),
            },
            format!(
                "context.time '{}' is not one of morning, afternoon, evening, night; it will be sent as-is",
                time
            ),
        )]
    }
}
