//! The conversation loop itself.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::agent::{Agent, Responder, Turn};
use crate::error::{JournalistError, Result};
use crate::termination::TerminationCondition;
use crate::tools::ToolRegistry;
use crate::types::{AgentRole, Message, ToolInvocation, Transcript, Usage};

use super::events::{ConversationEventPayload, ConversationEventSink, EventEmitter};
use super::{ConversationOutcome, ConversationSettings, ConversationStatus, SpeakerSelection};

/// An agent and the responder that speaks for it.
#[derive(Clone)]
pub struct Participant {
    pub agent: Agent,
    pub responder: Arc<dyn Responder>,
}

impl Participant {
    pub fn new(agent: Agent, responder: Arc<dyn Responder>) -> Self {
        Self { agent, responder }
    }
}

impl std::fmt::Debug for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Participant")
            .field("agent", &self.agent.role)
            .field("is_human", &self.agent.is_human)
            .finish()
    }
}

/// Sequential multi-agent conversation.
///
/// Exactly one participant speaks per round. Tool calls in a reply are run
/// through the registry, in order, before the message is appended. After each
/// append the termination condition is checked; otherwise the next speaker is
/// chosen by the selection policy.
pub struct ConversationLoop {
    participants: Vec<Participant>,
    registry: ToolRegistry,
    termination: Arc<dyn TerminationCondition>,
    settings: ConversationSettings,
    event_sink: Option<ConversationEventSink>,
}

impl ConversationLoop {
    pub fn new(
        participants: Vec<Participant>,
        registry: ToolRegistry,
        termination: impl TerminationCondition + 'static,
    ) -> Self {
        Self {
            participants,
            registry,
            termination: Arc::new(termination),
            settings: ConversationSettings::default(),
            event_sink: None,
        }
    }

    pub fn with_settings(mut self, settings: ConversationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.settings.max_rounds = max_rounds;
        self
    }

    pub fn with_event_sink(mut self, sink: ConversationEventSink) -> Self {
        self.event_sink = Some(sink);
        self
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &ConversationSettings {
        &self.settings
    }

    fn roles(&self) -> Vec<AgentRole> {
        self.participants.iter().map(|p| p.agent.role).collect()
    }

    /// Check the setup before any message is produced.
    pub fn validate(&self) -> Result<()> {
        if self.participants.is_empty() {
            return Err(JournalistError::Configuration(
                "a conversation needs at least one participant".into(),
            ));
        }
        if self.settings.max_rounds == 0 {
            return Err(JournalistError::Configuration("max_rounds must be at least 1".into()));
        }
        if self.settings.initiator >= self.participants.len() {
            return Err(JournalistError::Configuration(format!(
                "initiator index {} is out of range for {} participants",
                self.settings.initiator,
                self.participants.len()
            )));
        }

        let mut seen = HashSet::new();
        for participant in &self.participants {
            let agent = &participant.agent;
            if !seen.insert(agent.role) {
                return Err(JournalistError::Configuration(format!(
                    "agent {} appears more than once",
                    agent.role
                )));
            }
            for tool in &agent.tools {
                let entry = self.registry.get(tool).ok_or_else(|| {
                    JournalistError::tool_resolution(
                        tool.as_str(),
                        format!("listed by {} but not registered", agent.role),
                    )
                })?;
                if entry.caller != agent.role {
                    return Err(JournalistError::UnauthorizedCaller {
                        tool: tool.clone(),
                        caller: agent.role,
                        expected: entry.caller,
                    });
                }
            }
        }
        for (name, entry) in self.registry.entries() {
            if !seen.contains(&entry.executor) {
                return Err(JournalistError::tool_resolution(
                    name,
                    format!("executor {} is not part of this conversation", entry.executor),
                ));
            }
        }
        Ok(())
    }

    fn next_speaker(&self, current: usize) -> usize {
        match self.settings.selection {
            SpeakerSelection::RoundRobin => (current + 1) % self.participants.len(),
        }
    }

    /// Run the conversation, starting with `initial_message` from the initiator.
    ///
    /// The initial message is round 1. The loop stops with
    /// [`ConversationStatus::Complete`] as soon as an appended message matches
    /// the termination condition, or with
    /// [`ConversationStatus::MaxRoundsReached`] once `max_rounds` messages exist.
    pub async fn run(&self, initial_message: impl Into<String>) -> Result<ConversationOutcome> {
        self.validate()?;

        let id = Uuid::new_v4();
        let roles = self.roles();
        let max_rounds = self.settings.max_rounds;
        let emitter = EventEmitter::new(id, self.event_sink.clone());

        info!(conversation_id = %id, participants = ?roles, max_rounds, "conversation started");
        emitter.emit(ConversationEventPayload::Started {
            participants: roles.clone(),
            max_rounds,
        });

        let mut transcript = Transcript::new();
        let mut usage = Usage::default();
        let mut status = ConversationStatus::MaxRoundsReached;
        let mut speaker = self.settings.initiator;
        let mut initial = Some(initial_message.into());

        for round in 1..=max_rounds {
            let participant = &self.participants[speaker];
            let message = match initial.take() {
                Some(text) => Message::new(participant.agent.role, text),
                None => {
                    match self
                        .take_turn(round, participant, &transcript, &roles, &emitter)
                        .await
                    {
                        Ok((message, turn_usage)) => {
                            usage.merge(&turn_usage);
                            message
                        }
                        Err(e) => {
                            warn!(conversation_id = %id, round, speaker = %participant.agent.role, error = %e, "conversation failed");
                            emitter.emit(ConversationEventPayload::Failed {
                                round,
                                error: e.to_string(),
                            });
                            return Err(e);
                        }
                    }
                }
            };

            let terminated = self.termination.is_termination(&message);
            debug!(
                round,
                speaker = %message.speaker,
                chars = message.content.len(),
                tool_calls = message.tool_calls.len(),
                terminated,
                "message appended"
            );
            emitter.emit(ConversationEventPayload::MessageAppended {
                round,
                message: message.clone(),
            });
            transcript.push(message);

            if terminated {
                status = ConversationStatus::Complete;
                break;
            }
            speaker = self.next_speaker(speaker);
        }

        let rounds = transcript.len();
        info!(conversation_id = %id, ?status, rounds, total_tokens = usage.total_tokens, "conversation finished");
        emitter.emit(ConversationEventPayload::Finished { status, rounds });

        Ok(ConversationOutcome {
            id,
            transcript,
            status,
            rounds,
            usage,
        })
    }

    async fn take_turn(
        &self,
        round: usize,
        participant: &Participant,
        transcript: &Transcript,
        roles: &[AgentRole],
        emitter: &EventEmitter,
    ) -> Result<(Message, Usage)> {
        let agent = &participant.agent;
        let tools = self.registry.definitions_for(agent);
        let turn = Turn {
            round,
            agent,
            transcript,
            participants: roles,
            tools: &tools,
        };

        let reply = participant.responder.respond(&turn).await?;

        let mut invocations = Vec::with_capacity(reply.tool_calls.len());
        for call in reply.tool_calls {
            let id = if call.id.is_empty() {
                format!("call_{}", Uuid::new_v4().simple())
            } else {
                call.id
            };
            let mut invocation = ToolInvocation::new(id, call.name, call.arguments);
            let executor = self.executor_for(&invocation.tool_name, roles)?;

            debug!(round, tool = %invocation.tool_name, caller = %agent.role, %executor, "executing tool");
            let result = self
                .registry
                .execute(
                    &invocation.tool_name,
                    invocation.arguments.clone(),
                    agent.role,
                    executor,
                )
                .await?;
            invocation.result = Some(result);

            emitter.emit(ConversationEventPayload::ToolInvoked {
                round,
                speaker: agent.role,
                invocation: invocation.clone(),
            });
            invocations.push(invocation);
        }

        let message = Message::new(agent.role, reply.content).with_tool_calls(invocations);
        Ok((message, reply.usage))
    }

    /// The registered executor of `tool`, which must take part in this conversation.
    fn executor_for(&self, tool: &str, roles: &[AgentRole]) -> Result<AgentRole> {
        let entry = self
            .registry
            .get(tool)
            .ok_or_else(|| JournalistError::tool_resolution(tool, "no such tool is registered"))?;
        if !roles.contains(&entry.executor) {
            return Err(JournalistError::tool_resolution(
                tool,
                format!("executor {} is not part of this conversation", entry.executor),
            ));
        }
        Ok(entry.executor)
    }
}

impl std::fmt::Debug for ConversationLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationLoop")
            .field("participants", &self.participants)
            .field("registry", &self.registry)
            .field("settings", &self.settings)
            .finish()
    }
}
