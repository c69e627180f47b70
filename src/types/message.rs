//! Conversation message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Speaker role in a newsroom conversation.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString,
)]
pub enum AgentRole {
    UserProxy,
    Researcher,
    Writer,
    Editor,
}

impl AgentRole {
    /// Canonical name used in model requests and transcripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserProxy => "UserProxy",
            Self::Researcher => "Researcher",
            Self::Writer => "Writer",
            Self::Editor => "Editor",
        }
    }
}

/// A single message appended to a transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub speaker: AgentRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolInvocation>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a plain text message.
    pub fn new(speaker: AgentRole, content: impl Into<String>) -> Self {
        Self {
            speaker,
            content: content.into(),
            tool_calls: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Attach executed tool invocations.
    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolInvocation>) -> Self {
        self.tool_calls = tool_calls;
        self
    }

    pub fn is_from(&self, role: AgentRole) -> bool {
        self.speaker == role
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// A tool call requested by an agent, with its result once executed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolInvocation {
    pub id: String,
    pub tool_name: String,
    pub arguments: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl ToolInvocation {
    pub fn new(id: impl Into<String>, tool_name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            tool_name: tool_name.into(),
            arguments,
            result: None,
        }
    }

    pub fn is_executed(&self) -> bool {
        self.result.is_some()
    }
}
