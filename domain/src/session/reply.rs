//! Reply contract of the remote reasoning service.
//!
//! Both `send message` and `import transcript` answer with the same shape.
//! Every field is optional on the wire; the helpers below decide what
//! counts as present.
//!
//! ```text
//! { reply, mode, emotion, intensity, relationship, learning, error }
//! ```
//!
//! Older servers answer with `response`, `learning_feedback` and the mode
//! nested under `debug.policy.mode`. Those keys are read into their own
//! fields and folded in, so a body carrying both spellings still decodes.

use super::entities::{Message, Reasoning};
use serde::{Deserialize, Serialize};

/// A reply from the reasoning service (Value Object)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireReply")]
pub struct ChatReply {
    /// Text the agent answered with
    pub reply: Option<String>,
    /// Persona/strategy the agent adopted (e.g. `venting_listener`)
    pub mode: Option<String>,
    /// Inferred primary emotion of the user
    pub emotion: Option<String>,
    /// Strength of the inferred emotion, 0.0 to 1.0
    pub intensity: Option<f64>,
    /// Inferred relationship with the other party (e.g. `roommate`)
    pub relationship: Option<String>,
    /// Narration of what the service just learned about the user
    pub learning: Option<String>,
    /// Server-reported failure
    pub error: Option<String>,
    /// Explanation already composed by the server, if any
    pub reasoning: Option<Reasoning>,
}

/// Reply body as it arrives, current and legacy keys side by side
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireReply {
    reply: Option<String>,
    response: Option<String>,
    mode: Option<String>,
    emotion: Option<String>,
    intensity: Option<f64>,
    relationship: Option<String>,
    learning: Option<String>,
    learning_feedback: Option<String>,
    error: Option<String>,
    reasoning: Option<Reasoning>,
    debug: Option<WireDebug>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireDebug {
    policy: Option<WirePolicy>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WirePolicy {
    mode: Option<String>,
}

impl From<WireReply> for ChatReply {
    fn from(wire: WireReply) -> Self {
        let legacy_mode = wire.debug.and_then(|d| d.policy).and_then(|p| p.mode);
        Self {
            reply: wire.reply.or(wire.response),
            mode: wire.mode.or(legacy_mode),
            emotion: wire.emotion,
            intensity: wire.intensity,
            relationship: wire.relationship,
            learning: wire.learning.or(wire.learning_feedback),
            error: wire.error,
            reasoning: wire.reasoning,
        }
    }
}

impl ChatReply {
    /// Convenience constructor for a plain successful reply.
    pub fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            ..Self::default()
        }
    }

    /// Convenience constructor for a server-reported failure.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// The server-reported error, if one was sent.
    ///
    /// An `error` key that is present but blank still counts: the server
    /// chose to flag the request as failed.
    pub fn semantic_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The learning narration, if it carries any text.
    pub fn learning_narration(&self) -> Option<&str> {
        self.learning
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// The reply text, if it carries any text.
    pub fn usable_reply(&self) -> Option<&str> {
        self.reply.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Build the agent message this reply represents.
    ///
    /// Reasoning composed by the server wins; otherwise it is synthesized
    /// from the emotion, relationship and mode signals.
    pub fn to_agent_message(&self) -> Message {
        let mut message = Message::agent(self.reply.clone().unwrap_or_default());

        if let Some(mode) = &self.mode {
            message = message.with_mode(mode.clone());
        }
        if let Some(emotion) = &self.emotion {
            message = message.with_emotion(emotion.clone(), self.intensity);
        } else {
            message.intensity = self.intensity;
        }

        let reasoning = self.reasoning.clone().or_else(|| {
            Reasoning::from_signals(
                self.emotion.as_deref(),
                self.intensity,
                self.relationship.as_deref(),
                self.mode.as_deref(),
            )
        });
        if let Some(reasoning) = reasoning {
            message = message.with_reasoning(reasoning);
        }

        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roommate_reply() -> ChatReply {
        ChatReply {
            reply: Some("That sounds hard.".to_string()),
            mode: Some("venting_listener".to_string()),
            emotion: Some("frustration".to_string()),
            intensity: Some(0.7),
            relationship: Some("roommate".to_string()),
            ..ChatReply::default()
        }
    }

    #[test]
    fn test_to_agent_message_carries_signals() {
        let message = roommate_reply().to_agent_message();
        assert!(message.is_agent());
        assert_eq!(message.text, "That sounds hard.");
        assert_eq!(message.mode.as_deref(), Some("venting_listener"));
        assert_eq!(message.emotion.as_deref(), Some("frustration"));
        assert_eq!(message.intensity, Some(0.7));

        let reasoning = message.reasoning.unwrap();
        assert_eq!(reasoning.understood, "frustration • roommate context");
        assert_eq!(reasoning.strategy, "venting listener");
    }

    #[test]
    fn test_server_reasoning_wins() {
        let reply = ChatReply {
            reasoning: Some(Reasoning {
                understood: "anger • boss context".to_string(),
                risk: "high risk".to_string(),
                strategy: "diplomatic advisor".to_string(),
            }),
            ..roommate_reply()
        };
        let reasoning = reply.to_agent_message().reasoning.unwrap();
        assert_eq!(reasoning.understood, "anger • boss context");
    }

    #[test]
    fn test_learning_narration_ignores_blank() {
        let mut reply = roommate_reply();
        assert_eq!(reply.learning_narration(), None);

        reply.learning = Some("   ".to_string());
        assert_eq!(reply.learning_narration(), None);

        reply.learning = Some("Buddy learned: needs venting space".to_string());
        assert_eq!(
            reply.learning_narration(),
            Some("Buddy learned: needs venting space")
        );
    }

    #[test]
    fn test_deserialize_full_contract() {
        let json = r#"{
            "reply": "That sounds hard.",
            "mode": "venting_listener",
            "emotion": "frustration",
            "intensity": 0.7,
            "relationship": "roommate",
            "learning": null,
            "error": null
        }"#;
        let reply: ChatReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply, roommate_reply());
    }

    #[test]
    fn test_deserialize_legacy_keys() {
        let json = r#"{
            "response": "Nice!",
            "learning_feedback": "Buddy learned: responds well to celebration",
            "reasoning": {"understood": "joy • friend context", "risk": "low risk", "strategy": "hype friend"}
        }"#;
        let reply: ChatReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.usable_reply(), Some("Nice!"));
        assert!(reply.learning_narration().is_some());
        assert_eq!(reply.reasoning.unwrap().strategy, "hype friend");
    }

    #[test]
    fn test_deserialize_both_spellings() {
        let json = r#"{
            "reply": "hi",
            "response": "hi (legacy)",
            "learning": "Buddy learned: likes short answers",
            "learning_feedback": "old narration"
        }"#;
        let reply: ChatReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.usable_reply(), Some("hi"));
        assert_eq!(
            reply.learning_narration(),
            Some("Buddy learned: likes short answers")
        );
    }

    #[test]
    fn test_legacy_mode_from_debug_policy() {
        let json = r#"{"response": "hey", "debug": {"policy": {"mode": "venting_listener", "tone": "calm"}}}"#;
        let reply: ChatReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.mode.as_deref(), Some("venting_listener"));
        assert_eq!(
            reply.to_agent_message().mode.as_deref(),
            Some("venting_listener")
        );

        let json = r#"{"reply": "hey", "mode": "hype_friend", "debug": {"policy": {"mode": "venting_listener"}}}"#;
        let reply: ChatReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.mode.as_deref(), Some("hype_friend"));
    }

    #[test]
    fn test_semantic_error() {
        let reply: ChatReply = serde_json::from_str(r#"{"error": "model overloaded"}"#).unwrap();
        assert_eq!(reply.semantic_error(), Some("model overloaded"));
        assert_eq!(reply.usable_reply(), None);
    }
}
