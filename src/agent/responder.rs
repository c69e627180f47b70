//! Responders produce an agent's reply for its turn.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::agent::Agent;
use crate::error::Result;
use crate::provider::{ModelProvider, ProviderRequest};
use crate::tools::ToolDefinition;
use crate::types::{
    AgentRole, AgentToolCall, FinishReason, GenerationSettings, Message, ModelMessage, Transcript, Usage,
};

/// Everything a responder sees when its agent is selected to speak.
#[derive(Debug, Clone, Copy)]
pub struct Turn<'a> {
    /// 1-based round number of the message being produced.
    pub round: usize,
    pub agent: &'a Agent,
    pub transcript: &'a Transcript,
    pub participants: &'a [AgentRole],
    /// Tools the agent may request this turn.
    pub tools: &'a [ToolDefinition],
}

/// An agent's reply before its tool calls are executed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    pub content: String,
    pub tool_calls: Vec<AgentToolCall>,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_tool_call(mut self, call: AgentToolCall) -> Self {
        self.tool_calls.push(call);
        self
    }
}

/// Produces replies for one conversation participant.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, turn: &Turn<'_>) -> Result<Reply>;
}

/// Fixed reply for human proxies that never prompt for input.
#[derive(Debug, Clone, Default)]
pub struct AutoReply {
    text: String,
}

impl AutoReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl Responder for AutoReply {
    async fn respond(&self, _turn: &Turn<'_>) -> Result<Reply> {
        Ok(Reply::text(self.text.clone()))
    }
}

/// Asks a language model for the agent's reply.
pub struct ModelResponder {
    provider: Arc<dyn ModelProvider>,
    settings: GenerationSettings,
}

impl ModelResponder {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            settings: GenerationSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }
}

#[async_trait]
impl Responder for ModelResponder {
    async fn respond(&self, turn: &Turn<'_>) -> Result<Reply> {
        let request = ProviderRequest {
            messages: build_messages(turn),
            settings: self.settings.clone(),
            tools: if turn.tools.is_empty() {
                None
            } else {
                Some(turn.tools.to_vec())
            },
        };

        debug!(
            agent = turn.agent.name(),
            round = turn.round,
            model = self.provider.model_id(),
            "requesting reply"
        );
        let response = self.provider.generate_text(&request).await?;
        if response.finish_reason == Some(FinishReason::Length) {
            warn!(
                agent = turn.agent.name(),
                round = turn.round,
                "reply was cut off at the token limit"
            );
        }

        Ok(Reply {
            content: response.text,
            tool_calls: response.tool_calls,
            usage: response.usage,
            finish_reason: response.finish_reason,
        })
    }
}

/// Group-chat introduction appended to every system prompt.
pub fn introduction(agent: &Agent, participants: &[AgentRole]) -> String {
    let names = participants
        .iter()
        .map(AgentRole::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "You are {} in a group chat. Participants, in speaking order: {names}.",
        agent.name()
    )
}

/// Render a transcript message (including tool calls and results) as text.
pub fn render_message(message: &Message) -> String {
    let mut text = message.content.clone();
    for call in &message.tool_calls {
        if !text.is_empty() {
            text.push_str("\n\n");
        }
        text.push_str(&format!("[tool call] {}({})", call.tool_name, call.arguments));
        if let Some(ref result) = call.result {
            text.push_str(&format!("\n[tool result] {result}"));
        }
    }
    text
}

/// Build the chat request for `turn`: the system prompt, then the transcript
/// with the agent's own messages as `assistant` and everyone else's as named
/// `user` messages. Messages that render empty are skipped.
pub fn build_messages(turn: &Turn<'_>) -> Vec<ModelMessage> {
    let intro = introduction(turn.agent, turn.participants);
    let system = if turn.agent.role_prompt.trim().is_empty() {
        intro
    } else {
        format!("{}\n\n{intro}", turn.agent.role_prompt.trim())
    };

    let mut messages = vec![ModelMessage::system(system)];
    for message in turn.transcript {
        let text = render_message(message);
        if text.is_empty() {
            continue;
        }
        if message.speaker == turn.agent.role {
            messages.push(ModelMessage::assistant(text));
        } else {
            messages.push(ModelMessage::user(text).with_name(message.speaker.as_str()));
        }
    }
    messages
}
