//! Conversation event stream types.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{AgentRole, Message, ToolInvocation};

use super::ConversationStatus;

/// Unique conversation identifier.
pub type ConversationId = Uuid;

/// Callback used for observing a running conversation.
pub type ConversationEventSink = Arc<dyn Fn(ConversationEvent) + Send + Sync>;

/// Concrete event payloads emitted by the conversation loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEventPayload {
    Started {
        participants: Vec<AgentRole>,
        max_rounds: usize,
    },
    ToolInvoked {
        round: usize,
        speaker: AgentRole,
        invocation: ToolInvocation,
    },
    MessageAppended {
        round: usize,
        message: Message,
    },
    Finished {
        status: ConversationStatus,
        rounds: usize,
    },
    Failed {
        round: usize,
        error: String,
    },
}

/// Envelope for conversation events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEvent {
    pub conversation_id: ConversationId,
    pub seq: u64,
    pub timestamp: DateTime<Utc>,
    pub payload: ConversationEventPayload,
}

pub(crate) struct EventEmitter {
    conversation_id: ConversationId,
    seq: AtomicU64,
    sink: Option<ConversationEventSink>,
}

impl EventEmitter {
    pub(crate) fn new(conversation_id: ConversationId, sink: Option<ConversationEventSink>) -> Self {
        Self {
            conversation_id,
            seq: AtomicU64::new(1),
            sink,
        }
    }

    pub(crate) fn emit(&self, payload: ConversationEventPayload) {
        let Some(sink) = &self.sink else { return; };
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        (sink)(ConversationEvent {
            conversation_id: self.conversation_id,
            seq,
            timestamp: Utc::now(),
            payload,
        });
    }
}
