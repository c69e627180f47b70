//! Round-robin multi-agent conversation loop.

pub mod events;
pub mod runner;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_MAX_ROUNDS;
use crate::types::{Transcript, Usage};

pub use events::{ConversationEvent, ConversationEventPayload, ConversationEventSink, ConversationId};
pub use runner::{ConversationLoop, Participant};

/// How the next speaker is chosen.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerSelection {
    /// Fixed cyclic order; no skipping and no priority.
    #[default]
    RoundRobin,
}

/// Why a conversation stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    /// A message satisfied the termination condition.
    Complete,
    /// `max_rounds` messages were produced without termination.
    MaxRoundsReached,
}

/// Loop limits and speaker policy.
#[derive(Debug, Clone, Builder, PartialEq, Eq)]
pub struct ConversationSettings {
    /// Total messages allowed, the initial message included.
    #[builder(default = DEFAULT_MAX_ROUNDS)]
    pub max_rounds: usize,
    #[builder(default)]
    pub selection: SpeakerSelection,
    /// Index of the participant that sends the initial message.
    #[builder(default)]
    pub initiator: usize,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Result of a finished conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationOutcome {
    pub id: ConversationId,
    pub transcript: Transcript,
    pub status: ConversationStatus,
    pub rounds: usize,
    pub usage: Usage,
}

impl ConversationOutcome {
    pub fn is_complete(&self) -> bool {
        self.status == ConversationStatus::Complete
    }
}
