//! Convenience re-exports for common use.

pub use crate::agent::{Agent, AutoReply, ModelResponder, Reply, Responder, Turn};
pub use crate::config::JournalistConfig;
pub use crate::conversation::{
    ConversationLoop, ConversationOutcome, ConversationSettings, ConversationStatus, Participant,
    SpeakerSelection,
};
pub use crate::error::{JournalistError, Result};
pub use crate::export::{export_article, ArticleExporter};
pub use crate::extract::{extract, Extraction};
pub use crate::newsroom::{GeneratedArticle, Newsroom};
pub use crate::provider::ModelProvider;
pub use crate::termination::{SentinelTermination, TerminationCondition};
pub use crate::tools::{AgentTool, AgentToolParameters, SearchTool, Tool, ToolArguments, ToolRegistry};
pub use crate::types::{AgentRole, Message, ToolInvocation, Transcript};
