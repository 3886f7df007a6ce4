//! Session domain entities

use crate::core::error::DomainError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed id of the synthetic greeting that opens every session.
pub const WELCOME_MESSAGE_ID: &str = "welcome";

/// Greeting shown before the user has said anything.
pub const WELCOME_TEXT: &str = "Hi! I'm Buddy. I can help with social situations, drafting replies, or just venting. What's on your mind?";

/// Persona the greeting is attributed to.
pub const WELCOME_MODE: &str = "chill_companion";

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    /// The remote persona
    Agent,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Agent => "agent",
        }
    }
}

/// Opaque, client-generated message identifier (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structured explanation of how the agent read the situation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reasoning {
    /// What the agent understood (emotion and relationship)
    pub understood: String,
    /// Perceived conflict risk
    pub risk: String,
    /// Strategy the agent chose, in human-readable form
    pub strategy: String,
}

impl Reasoning {
    /// Synthesize reasoning from the signals attached to a reply.
    ///
    /// Returns `None` when the reply carried none of the signals.
    pub fn from_signals(
        emotion: Option<&str>,
        intensity: Option<f64>,
        relationship: Option<&str>,
        mode: Option<&str>,
    ) -> Option<Self> {
        if emotion.is_none() && relationship.is_none() && mode.is_none() {
            return None;
        }

        let emotion = emotion.unwrap_or("neutral");
        let relationship = relationship.unwrap_or("unknown");

        Some(Self {
            understood: format!("{} • {} context", emotion, relationship),
            risk: format!("{} risk", risk_level(intensity)),
            strategy: mode.map(humanize_label).unwrap_or_else(|| "listen".to_string()),
        })
    }
}

fn risk_level(intensity: Option<f64>) -> &'static str {
    match intensity {
        Some(i) if i >= 0.7 => "high",
        Some(i) if i >= 0.4 => "medium",
        Some(_) => "low",
        None => "unknown",
    }
}

/// Turn a snake_case label such as `venting_listener` into `venting listener`.
pub fn humanize_label(label: &str) -> String {
    label.replace('_', " ")
}

/// A message in the conversation timeline (Entity)
///
/// Messages are immutable once appended; the agent-only fields are always
/// `None` on user messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
    pub mode: Option<String>,
    pub emotion: Option<String>,
    pub intensity: Option<f64>,
    pub reasoning: Option<Reasoning>,
}

impl Message {
    /// Create a user message with a fresh id and the current time.
    ///
    /// The text is kept as typed; it only has to contain something other
    /// than whitespace.
    pub fn user(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        Ok(Self {
            id: MessageId::generate(),
            text,
            sender: Sender::User,
            timestamp: Local::now(),
            mode: None,
            emotion: None,
            intensity: None,
            reasoning: None,
        })
    }

    /// Create an agent message with no signals attached.
    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            text: text.into(),
            sender: Sender::Agent,
            timestamp: Local::now(),
            mode: None,
            emotion: None,
            intensity: None,
            reasoning: None,
        }
    }

    /// The greeting every session starts with.
    pub fn welcome() -> Self {
        Self {
            id: MessageId::new(WELCOME_MESSAGE_ID),
            mode: Some(WELCOME_MODE.to_string()),
            ..Self::agent(WELCOME_TEXT)
        }
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn with_emotion(mut self, emotion: impl Into<String>, intensity: Option<f64>) -> Self {
        self.emotion = Some(emotion.into());
        self.intensity = intensity;
        self
    }

    pub fn with_reasoning(mut self, reasoning: Reasoning) -> Self {
        self.reasoning = Some(reasoning);
        self
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn is_agent(&self) -> bool {
        self.sender == Sender::Agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_rejects_blank_text() {
        assert_eq!(Message::user("").unwrap_err(), DomainError::EmptyMessage);
        assert_eq!(Message::user("  \n\t").unwrap_err(), DomainError::EmptyMessage);
    }

    #[test]
    fn test_user_message_keeps_text_verbatim() {
        let msg = Message::user("  hello  ").unwrap();
        assert_eq!(msg.text, "  hello  ");
        assert!(msg.is_user());
        assert!(msg.mode.is_none());
        assert!(msg.reasoning.is_none());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Message::user("a").unwrap();
        let b = Message::user("b").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_welcome_message() {
        let msg = Message::welcome();
        assert_eq!(msg.id.as_str(), WELCOME_MESSAGE_ID);
        assert!(msg.is_agent());
        assert_eq!(msg.mode.as_deref(), Some("chill_companion"));
    }

    #[test]
    fn test_reasoning_from_signals() {
        let reasoning = Reasoning::from_signals(
            Some("frustration"),
            Some(0.7),
            Some("roommate"),
            Some("venting_listener"),
        )
        .unwrap();
        assert_eq!(reasoning.understood, "frustration • roommate context");
        assert_eq!(reasoning.risk, "high risk");
        assert_eq!(reasoning.strategy, "venting listener");
    }

    #[test]
    fn test_reasoning_absent_without_signals() {
        assert!(Reasoning::from_signals(None, Some(0.2), None, None).is_none());
    }

    #[test]
    fn test_reasoning_risk_without_intensity() {
        let reasoning = Reasoning::from_signals(Some("joy"), None, None, None).unwrap();
        assert_eq!(reasoning.understood, "joy • unknown context");
        assert_eq!(reasoning.risk, "unknown risk");
        assert_eq!(reasoning.strategy, "listen");
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_string(&Sender::Agent).unwrap();
        assert_eq!(json, "\"agent\"");
    }
}
