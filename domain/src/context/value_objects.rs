//! Ambient context value objects

use crate::core::error::DomainError;
use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Place reported when the user has not said where they are.
pub const UNKNOWN_PLACE: &str = "unknown";

/// Coarse time-of-day bucket sent with every message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Bucket a 24h clock hour.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    /// Bucket for the local wall clock right now.
    pub fn now() -> Self {
        Self::from_hour(Local::now().hour())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            "night" => Ok(TimeOfDay::Night),
            other => Err(DomainError::InvalidTimeOfDay(other.to_string())),
        }
    }
}

/// Ambient metadata about where and when the user is talking (Value Object)
///
/// All fields are optional; [`Context::resolve`] fills the gaps with the
/// defaults the service expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    pub city: Option<String>,
    /// Venue type such as `home`, `cafe`, `office`
    pub place: Option<String>,
    /// Free-form time label; derived from the clock when unset
    pub time: Option<String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Overlay `other` on top of `self`: fields set in `other` win.
    pub fn merged_with(&self, other: &Context) -> Context {
        Context {
            city: other.city.clone().or_else(|| self.city.clone()),
            place: other.place.clone().or_else(|| self.place.clone()),
            time: other.time.clone().or_else(|| self.time.clone()),
        }
    }

    /// Fill missing or blank fields with wire defaults.
    pub fn resolve(&self, time_of_day: TimeOfDay) -> ResolvedContext {
        ResolvedContext {
            city: non_blank(&self.city).unwrap_or_default(),
            place: non_blank(&self.place).unwrap_or_else(|| UNKNOWN_PLACE.to_string()),
            time: non_blank(&self.time).unwrap_or_else(|| time_of_day.to_string()),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Context with every field filled in, as sent to the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedContext {
    pub city: String,
    pub place: String,
    pub time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day_buckets() {
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(16), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(20), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::Night);
    }

    #[test]
    fn test_time_of_day_parse() {
        assert_eq!("Evening".parse::<TimeOfDay>().unwrap(), TimeOfDay::Evening);
        assert!("noon".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_resolve_defaults() {
        let resolved = Context::new().resolve(TimeOfDay::Night);
        assert_eq!(resolved.city, "");
        assert_eq!(resolved.place, "unknown");
        assert_eq!(resolved.time, "night");
    }

    #[test]
    fn test_resolve_treats_blank_as_missing() {
        let resolved = Context::new()
            .with_city("  ")
            .with_place("")
            .resolve(TimeOfDay::Morning);
        assert_eq!(resolved.city, "");
        assert_eq!(resolved.place, "unknown");
        assert_eq!(resolved.time, "morning");
    }

    #[test]
    fn test_resolve_keeps_explicit_values() {
        let resolved = Context::new()
            .with_city("Mumbai")
            .with_place("cafe")
            .with_time("19:30")
            .resolve(TimeOfDay::Morning);
        assert_eq!(resolved.city, "Mumbai");
        assert_eq!(resolved.place, "cafe");
        assert_eq!(resolved.time, "19:30");
    }

    #[test]
    fn test_merged_with_overlay_wins() {
        let base = Context::new().with_city("Mumbai").with_place("home");
        let overlay = Context::new().with_place("office");
        let merged = base.merged_with(&overlay);
        assert_eq!(merged.city.as_deref(), Some("Mumbai"));
        assert_eq!(merged.place.as_deref(), Some("office"));
        assert_eq!(merged.time, None);
    }
}
