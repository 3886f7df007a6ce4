//! Learning insights the service has accumulated about a user.

use serde::{Deserialize, Serialize};

/// Aggregate learning insights (Value Object)
///
/// Fetched from the service and replaced wholesale; the client never
/// computes or merges these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireInsights")]
pub struct LearningInsights {
    pub total_interactions: u64,
    pub common_scenarios: Vec<String>,
    pub common_emotions: Vec<String>,
    pub preferred_modes: Vec<String>,
    pub adaptations_learned: Vec<String>,
}

/// Insights body as it arrives: camelCase, snake_case, or the older
/// `learned_traits` list. The first spelling present wins.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireInsights {
    #[serde(rename = "totalInteractions")]
    total_interactions_camel: Option<u64>,
    total_interactions: Option<u64>,
    #[serde(rename = "commonScenarios")]
    common_scenarios_camel: Option<Vec<String>>,
    common_scenarios: Option<Vec<String>>,
    #[serde(rename = "commonEmotions")]
    common_emotions_camel: Option<Vec<String>>,
    common_emotions: Option<Vec<String>>,
    #[serde(rename = "preferredModes")]
    preferred_modes_camel: Option<Vec<String>>,
    preferred_modes: Option<Vec<String>>,
    #[serde(rename = "adaptationsLearned")]
    adaptations_learned_camel: Option<Vec<String>>,
    adaptations_learned: Option<Vec<String>>,
    learned_traits: Option<Vec<String>>,
}

impl From<WireInsights> for LearningInsights {
    fn from(wire: WireInsights) -> Self {
        Self {
            total_interactions: wire
                .total_interactions_camel
                .or(wire.total_interactions)
                .unwrap_or_default(),
            common_scenarios: wire
                .common_scenarios_camel
                .or(wire.common_scenarios)
                .unwrap_or_default(),
            common_emotions: wire
                .common_emotions_camel
                .or(wire.common_emotions)
                .unwrap_or_default(),
            preferred_modes: wire
                .preferred_modes_camel
                .or(wire.preferred_modes)
                .unwrap_or_default(),
            adaptations_learned: wire
                .adaptations_learned_camel
                .or(wire.adaptations_learned)
                .or(wire.learned_traits)
                .unwrap_or_default(),
        }
    }
}

impl LearningInsights {
    /// True when the service has not learned anything yet.
    ///
    /// This is the normal state of a fresh profile, not an error.
    pub fn is_empty(&self) -> bool {
        self.total_interactions == 0
            && self.common_scenarios.is_empty()
            && self.common_emotions.is_empty()
            && self.preferred_modes.is_empty()
            && self.adaptations_learned.is_empty()
    }
}
