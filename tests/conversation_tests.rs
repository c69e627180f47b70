//! Tests for the round-robin conversation loop.

mod common;

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;

use common::{FailingResponder, ScriptedResponder};
use journalist::agent::{Agent, AutoReply, Reply, Responder};
use journalist::conversation::*;
use journalist::error::JournalistError;
use journalist::termination::SentinelTermination;
use journalist::tools::{AgentTool, AgentToolParameters, ToolRegistry};
use journalist::types::{AgentRole, AgentToolCall};

fn participant(agent: Agent, responder: Arc<dyn Responder>) -> Participant {
    Participant::new(agent, responder)
}

fn three_way(
    researcher: Arc<dyn Responder>,
    writer: Arc<dyn Responder>,
) -> Vec<Participant> {
    vec![
        participant(Agent::human(AgentRole::UserProxy), Arc::new(AutoReply::default())),
        participant(Agent::new(AgentRole::Researcher, "research"), researcher),
        participant(Agent::new(AgentRole::Writer, "write"), writer),
    ]
}

fn lookup_tool() -> Arc<AgentTool> {
    Arc::new(AgentTool::new(
        "lookup",
        "Look something up",
        AgentToolParameters::object().string("query", "Query", true).build(),
        |args, ctx| async move {
            Ok(serde_json::json!({
                "answer": format!("facts about {}", args.get_str("query")?),
                "executor": ctx.executor.as_str(),
            }))
        },
    ))
}

fn lookup_call(name: &str) -> AgentToolCall {
    AgentToolCall {
        id: "call_1".into(),
        name: name.into(),
        arguments: serde_json::json!({"query": "rust"}),
    }
}

#[tokio::test]
async fn speakers_follow_round_robin_order() {
    let researcher = Arc::new(ScriptedResponder::default());
    let writer = Arc::new(ScriptedResponder::default());
    let conversation = ConversationLoop::new(
        three_way(researcher.clone(), writer.clone()),
        ToolRegistry::new(),
        SentinelTermination::default(),
    )
    .with_max_rounds(7);

    let outcome = conversation.run("Write an article about Rust.").await.unwrap();

    assert_eq!(
        outcome.transcript.speakers(),
        vec![
            AgentRole::UserProxy,
            AgentRole::Researcher,
            AgentRole::Writer,
            AgentRole::UserProxy,
            AgentRole::Researcher,
            AgentRole::Writer,
            AgentRole::UserProxy,
        ]
    );
    assert_eq!(outcome.status, ConversationStatus::MaxRoundsReached);
    assert_eq!(outcome.rounds, 7);
    assert_eq!(researcher.rounds(), vec![2, 5]);
    assert_eq!(writer.rounds(), vec![3, 6]);
}

#[tokio::test]
async fn initial_message_is_round_one() {
    let conversation = ConversationLoop::new(
        three_way(
            Arc::new(ScriptedResponder::default()),
            Arc::new(ScriptedResponder::default()),
        ),
        ToolRegistry::new(),
        SentinelTermination::default(),
    )
    .with_max_rounds(1);

    let outcome = conversation.run("topic").await.unwrap();
    assert_eq!(outcome.rounds, 1);
    assert_eq!(outcome.transcript.messages()[0].content, "topic");
    assert_eq!(outcome.transcript.messages()[0].speaker, AgentRole::UserProxy);
}

#[tokio::test]
async fn sentinel_halts_immediately() {
    let researcher = Arc::new(ScriptedResponder::texts(&["Done. TERMINATE"]));
    let writer = Arc::new(ScriptedResponder::default());
    let conversation = ConversationLoop::new(
        three_way(researcher, writer.clone()),
        ToolRegistry::new(),
        SentinelTermination::default(),
    );

    let outcome = conversation.run("topic").await.unwrap();

    assert_eq!(outcome.status, ConversationStatus::Complete);
    assert!(outcome.is_complete());
    assert_eq!(outcome.rounds, 2);
    assert!(writer.rounds().is_empty());
}

#[tokio::test]
async fn sentinel_in_initial_message_ends_the_conversation() {
    let researcher = Arc::new(ScriptedResponder::default());
    let conversation = ConversationLoop::new(
        three_way(researcher.clone(), Arc::new(ScriptedResponder::default())),
        ToolRegistry::new(),
        SentinelTermination::default(),
    );

    let outcome = conversation.run("TERMINATE").await.unwrap();

    assert_eq!(outcome.status, ConversationStatus::Complete);
    assert_eq!(outcome.rounds, 1);
    assert!(researcher.rounds().is_empty());
}

#[tokio::test]
async fn empty_replies_still_count_as_rounds() {
    let conversation = ConversationLoop::new(
        three_way(
            Arc::new(ScriptedResponder::texts(&["", ""])),
            Arc::new(ScriptedResponder::texts(&["", ""])),
        ),
        ToolRegistry::new(),
        SentinelTermination::default(),
    )
    .with_max_rounds(5);

    let outcome = conversation.run("topic").await.unwrap();

    assert_eq!(outcome.rounds, 5);
    assert!(outcome.transcript.iter().skip(1).all(|m| m.content.is_empty()));
}

#[tokio::test]
async fn tool_results_are_recorded_on_the_message() {
    let registry = ToolRegistry::new()
        .with_tool("lookup", lookup_tool(), AgentRole::Researcher, AgentRole::UserProxy)
        .unwrap();
    let researcher = Arc::new(ScriptedResponder::new([
        Reply::text("searching").with_tool_call(lookup_call("lookup"))
    ]));
    let participants = vec![
        participant(Agent::human(AgentRole::UserProxy), Arc::new(AutoReply::default())),
        participant(
            Agent::new(AgentRole::Researcher, "research").with_tool("lookup"),
            researcher,
        ),
    ];
    let conversation =
        ConversationLoop::new(participants, registry, SentinelTermination::default()).with_max_rounds(2);

    let outcome = conversation.run("topic").await.unwrap();

    let message = outcome.transcript.last().unwrap();
    assert_eq!(message.speaker, AgentRole::Researcher);
    assert_eq!(message.content, "searching");
    assert_eq!(message.tool_calls.len(), 1);
    let result = message.tool_calls[0].result.as_ref().unwrap();
    assert_eq!(result["answer"], "facts about rust");
    assert_eq!(result["executor"], "UserProxy");
}

#[tokio::test]
async fn unknown_tool_fails_the_run() {
    let researcher = Arc::new(ScriptedResponder::new([
        Reply::text("").with_tool_call(lookup_call("does_not_exist"))
    ]));
    let conversation = ConversationLoop::new(
        three_way(researcher, Arc::new(ScriptedResponder::default())),
        ToolRegistry::new(),
        SentinelTermination::default(),
    );

    let err = conversation.run("topic").await.unwrap_err();
    assert!(matches!(err, JournalistError::ToolResolution { ref tool, .. } if tool == "does_not_exist"));
}

#[tokio::test]
async fn wrong_caller_is_refused() {
    let registry = ToolRegistry::new()
        .with_tool("lookup", lookup_tool(), AgentRole::Researcher, AgentRole::UserProxy)
        .unwrap();
    let writer = Arc::new(ScriptedResponder::new([
        Reply::text("").with_tool_call(lookup_call("lookup"))
    ]));
    let conversation = ConversationLoop::new(
        three_way(Arc::new(ScriptedResponder::default()), writer),
        registry,
        SentinelTermination::default(),
    );

    let err = conversation.run("topic").await.unwrap_err();
    assert!(matches!(
        err,
        JournalistError::UnauthorizedCaller {
            caller: AgentRole::Writer,
            expected: AgentRole::Researcher,
            ..
        }
    ));
}

#[tokio::test]
async fn executor_must_take_part() {
    let registry = ToolRegistry::new()
        .with_tool("lookup", lookup_tool(), AgentRole::Researcher, AgentRole::Editor)
        .unwrap();
    let researcher = Arc::new(ScriptedResponder::new([
        Reply::text("").with_tool_call(lookup_call("lookup"))
    ]));
    let participants = vec![
        participant(Agent::human(AgentRole::UserProxy), Arc::new(AutoReply::default())),
        participant(
            Agent::new(AgentRole::Researcher, "research").with_tool("lookup"),
            researcher,
        ),
    ];
    let conversation = ConversationLoop::new(participants, registry, SentinelTermination::default());

    let err = conversation.run("topic").await.unwrap_err();
    assert!(matches!(err, JournalistError::ToolResolution { .. }));
}

#[tokio::test]
async fn invalid_setups_are_rejected_before_running() {
    let empty = ConversationLoop::new(Vec::new(), ToolRegistry::new(), SentinelTermination::default());
    assert!(matches!(empty.run("x").await, Err(JournalistError::Configuration(_))));

    let zero = ConversationLoop::new(
        three_way(
            Arc::new(ScriptedResponder::default()),
            Arc::new(ScriptedResponder::default()),
        ),
        ToolRegistry::new(),
        SentinelTermination::default(),
    )
    .with_max_rounds(0);
    assert!(matches!(zero.validate(), Err(JournalistError::Configuration(_))));

    let duplicate = ConversationLoop::new(
        vec![
            participant(Agent::new(AgentRole::Writer, "a"), Arc::new(AutoReply::default())),
            participant(Agent::new(AgentRole::Writer, "b"), Arc::new(AutoReply::default())),
        ],
        ToolRegistry::new(),
        SentinelTermination::default(),
    );
    assert!(matches!(duplicate.validate(), Err(JournalistError::Configuration(_))));

    let unregistered = ConversationLoop::new(
        vec![participant(
            Agent::new(AgentRole::Researcher, "r").with_tool("lookup"),
            Arc::new(AutoReply::default()),
        )],
        ToolRegistry::new(),
        SentinelTermination::default(),
    );
    assert!(matches!(
        unregistered.validate(),
        Err(JournalistError::ToolResolution { .. })
    ));
}

#[tokio::test]
async fn responder_errors_propagate() {
    let conversation = ConversationLoop::new(
        three_way(Arc::new(FailingResponder), Arc::new(ScriptedResponder::default())),
        ToolRegistry::new(),
        SentinelTermination::default(),
    );

    let err = conversation.run("topic").await.unwrap_err();
    assert!(matches!(err, JournalistError::Api { status: 503, .. }));
}

#[tokio::test]
async fn events_describe_the_run() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink_events = Arc::clone(&events);
    let conversation = ConversationLoop::new(
        three_way(
            Arc::new(ScriptedResponder::default()),
            Arc::new(ScriptedResponder::default()),
        ),
        ToolRegistry::new(),
        SentinelTermination::default(),
    )
    .with_max_rounds(3)
    .with_event_sink(Arc::new(move |event: ConversationEvent| sink_events.lock().unwrap().push(event)));

    let outcome = conversation.run("topic").await.unwrap();
    let events = events.lock().unwrap();

    assert!(events.iter().all(|e| e.conversation_id == outcome.id));
    let seqs: Vec<u64> = events.iter().map(|e| e.seq).collect();
    assert_eq!(seqs, (1..=events.len() as u64).collect::<Vec<_>>());

    assert!(matches!(
        events.first().unwrap().payload,
        ConversationEventPayload::Started { max_rounds: 3, .. }
    ));
    let appended = events
        .iter()
        .filter(|e| matches!(e.payload, ConversationEventPayload::MessageAppended { .. }))
        .count();
    assert_eq!(appended, 3);
    assert!(matches!(
        events.last().unwrap().payload,
        ConversationEventPayload::Finished {
            status: ConversationStatus::MaxRoundsReached,
            rounds: 3
        }
    ));
}
