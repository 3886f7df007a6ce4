//! Append-only message timeline

use super::entities::Message;
use serde::Serialize;

/// Ordered, append-only sequence of messages (Entity)
///
/// There is no way to remove or edit an entry once it has been pushed;
/// insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Timeline {
    messages: Vec<Message>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// A timeline holding only the session greeting.
    pub fn with_welcome() -> Self {
        let mut timeline = Self::new();
        timeline.push(Message::welcome());
        timeline
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_welcome_has_single_agent_message() {
        let timeline = Timeline::with_welcome();
        assert_eq!(timeline.len(), 1);
        let greeting = timeline.last().unwrap();
        assert!(greeting.is_agent());
        assert_eq!(greeting.id.as_str(), "welcome");
    }

    #[test]
    fn test_push_preserves_insertion_order() {
        let mut timeline = Timeline::new();
        timeline.push(Message::user("first").unwrap());
        timeline.push(Message::agent("second"));
        timeline.push(Message::user("third").unwrap());

        let texts: Vec<_> = timeline.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }
}
