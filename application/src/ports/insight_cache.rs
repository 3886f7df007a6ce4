//! Insight cache port

use yara_domain::LearningInsights;

/// Last-known learning insights, for whoever renders them
pub trait InsightCache: Send + Sync {
    /// Replace the cached insights wholesale.
    fn replace(&self, insights: LearningInsights);

    /// The cached insights, or `None` before the first successful fetch.
    fn current(&self) -> Option<LearningInsights>;
}
