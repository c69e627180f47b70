//! Conditions that end a conversation after a message is appended.

use crate::types::Message;

/// Marker an agent writes to end the conversation.
pub const DEFAULT_SENTINEL: &str = "TERMINATE";

/// Predicate evaluated against every completed message.
pub trait TerminationCondition: Send + Sync {
    fn is_termination(&self, message: &Message) -> bool;
}

/// Stop when a fixed substring appears in the message content.
#[derive(Debug, Clone)]
pub struct SentinelTermination {
    sentinel: String,
}

impl SentinelTermination {
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }
}

impl Default for SentinelTermination {
    fn default() -> Self {
        Self::new(DEFAULT_SENTINEL)
    }
}

impl TerminationCondition for SentinelTermination {
    fn is_termination(&self, message: &Message) -> bool {
        message.content.contains(&self.sentinel)
    }
}
