//! Learning-insight cache

use std::sync::RwLock;
use yara_application::InsightCache;
use yara_domain::LearningInsights;

/// Keeps the most recently fetched insights in memory.
#[derive(Debug, Default)]
pub struct InMemoryInsightCache {
    current: RwLock<Option<LearningInsights>>,
}

impl InMemoryInsightCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InsightCache for InMemoryInsightCache {
    fn replace(&self, insights: LearningInsights) {
        match self.current.write() {
            Ok(mut current) => *current = Some(insights),
            Err(poisoned) => *poisoned.into_inner() = Some(insights),
        }
    }

    fn current(&self) -> Option<LearningInsights> {
        match self.current.read() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty_then_replaces() {
        let cache = InMemoryInsightCache::new();
        assert!(cache.current().is_none());

        cache.replace(LearningInsights {
            total_interactions: 2,
            ..LearningInsights::default()
        });
        cache.replace(LearningInsights {
            preferred_modes: vec!["chill_companion".to_string()],
            ..LearningInsights::default()
        });

        let current = cache.current().unwrap();
        assert_eq!(current.total_interactions, 0);
        assert_eq!(current.preferred_modes, vec!["chill_companion"]);
    }
}
