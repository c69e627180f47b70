//! Append-only conversation transcript.

use serde::{Deserialize, Serialize};

use super::message::{AgentRole, Message};

/// Ordered record of every message in a conversation.
///
/// Insertion order is chronological order. Messages can only be appended;
/// nothing already recorded is ever edited or removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
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

    /// Speakers in chronological order.
    pub fn speakers(&self) -> Vec<AgentRole> {
        self.messages.iter().map(|m| m.speaker).collect()
    }

    /// Pretty JSON suitable for persisting next to an exported article.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl FromIterator<Message> for Transcript {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.push(Message::new(AgentRole::UserProxy, "topic"));
        transcript.push(Message::new(AgentRole::Researcher, "findings"));

        assert_eq!(
            transcript.speakers(),
            vec![AgentRole::UserProxy, AgentRole::Researcher]
        );
        assert_eq!(transcript.last().unwrap().content, "findings");
    }

    #[test]
    fn serializes_as_plain_array() {
        let transcript: Transcript = vec![Message::new(AgentRole::Writer, "a")]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&transcript).unwrap();
        assert!(json.is_array());
        let back: Transcript = serde_json::from_value(json).unwrap();
        assert_eq!(back, transcript);
    }
}
